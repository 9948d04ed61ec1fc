use crate::context::AppContext;
use crate::context::error::ClientError;
use std::fmt;

/// Last observed state of one remote service.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Connected,
    Error(String),
}

impl ServiceHealth {
    fn from_check(result: Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => ServiceHealth::Connected,
            Err(err) => ServiceHealth::Error(err.to_string()),
        }
    }

    /// Record the outcome of an ordinary call against the service.
    pub fn record(&mut self, error: Option<&str>) {
        *self = match error {
            None => ServiceHealth::Connected,
            Some(err) => ServiceHealth::Error(err.to_string()),
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceHealth::Unknown => "unknown",
            ServiceHealth::Connected => "connected",
            ServiceHealth::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceStatus {
    pub backend: ServiceHealth,
    pub database: ServiceHealth,
}

impl ServiceStatus {
    pub fn has_error(&self) -> bool {
        matches!(self.backend, ServiceHealth::Error(_))
            || matches!(self.database, ServiceHealth::Error(_))
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            status_line("Backend Service", &self.backend),
            status_line("Database Service", &self.database),
        ]
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

fn status_line(name: &str, health: &ServiceHealth) -> String {
    match health {
        ServiceHealth::Unknown => format!("? {name}: Unknown"),
        ServiceHealth::Connected => format!("\u{2713} {name}: Connected"),
        ServiceHealth::Error(err) => format!("\u{2717} {name}: {err}"),
    }
}

/// Eagerly connect to both services, one after the other.
pub async fn check_services(ctx: &AppContext) -> ServiceStatus {
    let backend = ServiceHealth::from_check(ctx.backend_client().check_connection().await);
    let database = ServiceHealth::from_check(ctx.database_client().check_connection().await);
    ServiceStatus { backend, database }
}
