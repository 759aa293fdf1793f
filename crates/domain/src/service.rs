use log::error;

use crate::{Plan, PlanRepository, PlanService, ReadError};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: PlanRepository> PlanService for Service<R> {
    fn get_plan(&self) -> Result<Plan, ReadError> {
        log_on_error!(self.repository.read_plan(), "get", "plan")
    }
}
