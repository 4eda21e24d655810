// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceState {
    /// Service built, never started.
    #[default]
    Created,
    /// Properties are being derived and the connector brought up.
    Starting,
    /// Connector is up and its transport is known.
    Running,
    /// Connector stop routine in progress.
    Stopping,
    /// Torn down, either explicitly or before any start.
    Stopped,
    /// Last start attempt failed; teardown already applied.
    Failed,
}

impl ServiceState {
    pub fn is_running(self) -> bool {
        self == ServiceState::Running
    }

    /// States from which `start` may begin a new attempt.
    pub fn can_start(self) -> bool {
        matches!(
            self,
            ServiceState::Created | ServiceState::Stopped | ServiceState::Failed
        )
    }

    pub(crate) fn can_transition_to(self, next: ServiceState) -> bool {
        use ServiceState::*;
        matches!(
            (self, next),
            (Created, Starting)
                | (Stopped, Starting)
                | (Failed, Starting)
                | (Starting, Running)
                | (Starting, Failed)
                | (Running, Stopping)
                | (Stopping, Stopped)
                | (Created, Stopped)
                | (Failed, Stopped)
                | (Stopped, Stopped)
        )
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Created => write!(f, "created"),
            ServiceState::Starting => write!(f, "starting"),
            ServiceState::Running => write!(f, "running"),
            ServiceState::Stopping => write!(f, "stopping"),
            ServiceState::Stopped => write!(f, "stopped"),
            ServiceState::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_created() {
        assert_eq!(ServiceState::default(), ServiceState::Created);
    }

    #[test]
    fn test_can_start() {
        assert!(ServiceState::Created.can_start());
        assert!(ServiceState::Stopped.can_start());
        assert!(ServiceState::Failed.can_start());
        assert!(!ServiceState::Running.can_start());
        assert!(!ServiceState::Starting.can_start());
        assert!(!ServiceState::Stopping.can_start());
    }

    #[test]
    fn test_start_path_transitions() {
        assert!(ServiceState::Created.can_transition_to(ServiceState::Starting));
        assert!(ServiceState::Starting.can_transition_to(ServiceState::Running));
        assert!(ServiceState::Starting.can_transition_to(ServiceState::Failed));
        assert!(ServiceState::Failed.can_transition_to(ServiceState::Starting));
    }

    #[test]
    fn test_stop_path_transitions() {
        assert!(ServiceState::Running.can_transition_to(ServiceState::Stopping));
        assert!(ServiceState::Stopping.can_transition_to(ServiceState::Stopped));
        assert!(ServiceState::Created.can_transition_to(ServiceState::Stopped));
        assert!(ServiceState::Stopped.can_transition_to(ServiceState::Stopped));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!ServiceState::Created.can_transition_to(ServiceState::Running));
        assert!(!ServiceState::Running.can_transition_to(ServiceState::Starting));
        assert!(!ServiceState::Running.can_transition_to(ServiceState::Failed));
        assert!(!ServiceState::Stopping.can_transition_to(ServiceState::Running));
        assert!(!ServiceState::Created.can_transition_to(ServiceState::Failed));
    }

    #[test]
    fn test_display() {
        assert_eq!(ServiceState::Created.to_string(), "created");
        assert_eq!(ServiceState::Running.to_string(), "running");
        assert_eq!(ServiceState::Stopped.to_string(), "stopped");
        assert_eq!(ServiceState::Failed.to_string(), "failed");
    }
}
