//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LandPlotCommand, LandPlotQuery, LoginService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Authentication port.
    pub login: Arc<dyn LoginService>,
    /// Plot mutation port.
    pub plots: Arc<dyn LandPlotCommand>,
    /// Plot read port.
    pub plots_query: Arc<dyn LandPlotQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication port.
    pub login: Arc<dyn LoginService>,
    /// Plot mutation port.
    pub plots: Arc<dyn LandPlotCommand>,
    /// Plot read port.
    pub plots_query: Arc<dyn LandPlotQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::LandPlotService;
    /// use backend::domain::ports::{FixtureLandPlotRepository, FixtureLoginService};
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let service = Arc::new(LandPlotService::new(Arc::new(
    ///     FixtureLandPlotRepository::new(),
    /// )));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     plots: service.clone(),
    ///     plots_query: service,
    /// });
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            plots,
            plots_query,
        } = ports;
        Self {
            login,
            plots,
            plots_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
