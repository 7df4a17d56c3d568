pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn notification_defaults_to_transient() {
        let n = types::Notification::success("Service deleted successfully.");
        assert_eq!(n.auto_dismiss_ms, types::Notification::AUTO_DISMISS_MS);
    }
}
