pub fn restart_service(service_name: &str) -> String {
    format!("Service '{service_name}' restarted successfully.")
}

pub fn check_service_status(service_name: &str) -> String {
    format!("Service '{service_name}' status: HEALTHY (mock).")
}
