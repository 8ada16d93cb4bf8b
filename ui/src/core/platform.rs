//! Platform detection and task spawning helpers.

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }
}

/// Runs `future` on the Dioxus runtime of the calling component or coroutine.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_tests_run_on_desktop() {
        assert_eq!(Platform::current(), Platform::Desktop);
        assert_eq!(Platform::current().label(), "desktop");
    }
}
