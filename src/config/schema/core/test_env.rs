use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serialize tests that touch process environment. A panicking test must
/// not wedge the others, so poisoning is ignored.
pub(super) fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Sets or clears one variable and restores the previous value on drop.
pub(super) struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub(super) fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: callers hold the guard from `lock_env`.
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    pub(super) fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: callers hold the guard from `lock_env`.
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }

    /// Clear every variable the overrides read, so ambient values on the
    /// test machine cannot leak in.
    pub(super) fn clear_all() -> Vec<Self> {
        [
            "BIJOCHAT_API_KEY",
            "GEMINI_API_KEY",
            "BIJOCHAT_MODELS",
            "BIJOCHAT_PORT",
            "PORT",
            "BIJOCHAT_HOST",
            "HOST",
            "BIJOCHAT_TEMPERATURE",
        ]
        .into_iter()
        .map(Self::unset)
        .collect()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: the enclosing test still holds the `lock_env` guard.
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}
