//! Builders for HTTP state ports.
//!
//! Chooses PostgreSQL-backed adapters when a pool is configured and falls
//! back to in-memory fixtures otherwise, so the server always boots with a
//! complete port set.

use std::sync::Arc;

use actix_web::web;

use backend::domain::LandPlotService;
use backend::domain::ports::{FixtureLandPlotRepository, FixtureLoginService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{DieselLandPlotRepository, DieselLoginService};

use super::ServerConfig;

/// Build the HTTP state from the configured adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(LandPlotService::new(Arc::new(
                DieselLandPlotRepository::new(pool.clone()),
            )));
            HttpStatePorts {
                login: Arc::new(DieselLoginService::new(pool.clone())),
                plots: service.clone(),
                plots_query: service,
            }
        }
        None => {
            let service = Arc::new(LandPlotService::new(Arc::new(
                FixtureLandPlotRepository::new(),
            )));
            HttpStatePorts {
                login: Arc::new(FixtureLoginService),
                plots: service.clone(),
                plots_query: service,
            }
        }
    };

    web::Data::new(HttpState::new(ports))
}
