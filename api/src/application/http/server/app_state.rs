use std::sync::Arc;

use bitebyte_core::application::BiteByteService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: BiteByteService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: BiteByteService) -> Self {
        Self { args, service }
    }
}
