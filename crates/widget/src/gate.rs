//! The admin gate: a client-side unlock flag.
//!
//! One configured password, compared exactly. No hashing, no lockout.

#[derive(Clone)]
pub struct AdminGate {
    password: String,
    input: String,
    unlocked: bool,
    error: bool,
    clear_error_on_input: bool,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            input: String::new(),
            unlocked: false,
            error: false,
            clear_error_on_input: true,
        }
    }

    /// Keep the wrong-password flag up until the next attempt.
    pub fn sticky_errors(mut self) -> Self {
        self.clear_error_on_input = false;
        self
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Whether the last attempt was wrong.
    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Update the password field.
    pub fn set_input(&mut self, input: impl Into<String>) {
        let input = input.into();
        if self.clear_error_on_input && input != self.input {
            self.error = false;
        }
        self.input = input;
    }

    /// Check the password field. On success the field is cleared.
    pub fn submit(&mut self) -> bool {
        if self.input == self.password {
            self.unlocked = true;
            self.error = false;
            self.input.clear();
            tracing::info!("Admin panel unlocked");
        } else {
            self.error = true;
            tracing::debug!("Admin unlock rejected");
        }
        self.unlocked
    }

    /// Type `attempt` into the field and submit it.
    pub fn unlock(&mut self, attempt: &str) -> bool {
        self.set_input(attempt);
        self.submit()
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
        self.input.clear();
        self.error = false;
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("unlocked", &self.unlocked)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_sets_error_and_stays_locked() {
        let mut gate = AdminGate::new("swarmadmin");
        assert!(!gate.unlock("swarmAdmin"));
        assert!(!gate.is_unlocked());
        assert!(gate.has_error());
        assert_eq!(gate.input(), "swarmAdmin");
    }

    #[test]
    fn correct_password_unlocks_and_clears_field() {
        let mut gate = AdminGate::new("swarmadmin");
        gate.unlock("nope");
        assert!(gate.unlock("swarmadmin"));
        assert!(gate.is_unlocked());
        assert!(!gate.has_error());
        assert_eq!(gate.input(), "");
    }

    #[test]
    fn comparison_is_exact() {
        let mut gate = AdminGate::new("swarmadmin");
        assert!(!gate.unlock(" swarmadmin"));
        assert!(!gate.unlock("swarmadmin "));
    }

    #[test]
    fn typing_clears_error() {
        let mut gate = AdminGate::new("pw");
        gate.unlock("x");
        assert!(gate.has_error());
        gate.set_input("xy");
        assert!(!gate.has_error());
    }

    #[test]
    fn sticky_errors_survive_typing() {
        let mut gate = AdminGate::new("pw").sticky_errors();
        gate.unlock("x");
        gate.set_input("xy");
        assert!(gate.has_error());
        assert!(gate.unlock("pw"));
        assert!(!gate.has_error());
    }

    #[test]
    fn lock_resets() {
        let mut gate = AdminGate::new("pw");
        gate.unlock("pw");
        gate.lock();
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn debug_hides_password() {
        let mut gate = AdminGate::new("hunter22");
        gate.set_input("hunter2");
        let dbg = format!("{gate:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
