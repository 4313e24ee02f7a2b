//! Script lifecycle
//!
//! A script is activated once when it loads and torn down once when it
//! unloads. Work that must happen at teardown is registered with
//! [`ScriptLifecycle::on_terminate`] while the script is active and run by
//! [`ScriptLifecycle::terminate`].

use thiserror::Error;

use crate::host::Host;

type TerminationHandler<H> = Box<dyn FnOnce(&mut H)>;

/// Termination handler registry
pub struct ScriptLifecycle<H> {
    handlers: Vec<TerminationHandler<H>>,
    terminated: bool,
}

impl<H> ScriptLifecycle<H> {
    /// Create an empty lifecycle
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            terminated: false,
        }
    }

    /// Register a handler to run once at teardown.
    ///
    /// Handlers registered after termination are dropped without running.
    pub fn on_terminate(&mut self, handler: impl FnOnce(&mut H) + 'static) {
        if self.terminated {
            log::warn!("Termination handler registered after teardown; ignoring it");
            return;
        }
        self.handlers.push(Box::new(handler));
    }

    /// Number of handlers waiting for teardown
    pub fn pending_handlers(&self) -> usize {
        self.handlers.len()
    }

    /// Whether teardown has already happened
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Run every registered handler in registration order.
    ///
    /// Returns the number of handlers run. Only the first call does anything.
    pub fn terminate(&mut self, host: &mut H) -> usize {
        if self.terminated {
            return 0;
        }
        self.terminated = true;

        let handlers = std::mem::take(&mut self.handlers);
        let count = handlers.len();
        for handler in handlers {
            handler(host);
        }

        log::debug!("Ran {} termination handler(s)", count);
        count
    }
}

impl<H> Default for ScriptLifecycle<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for ScriptLifecycle<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptLifecycle")
            .field("pending_handlers", &self.handlers.len())
            .field("terminated", &self.terminated)
            .finish()
    }
}

/// A script the host loads and later unloads
pub trait Script<H: Host> {
    /// Error returned by activation
    type Error: std::error::Error + 'static;

    /// Called once when the script loads
    fn activate(
        &mut self,
        host: &mut H,
        lifecycle: &mut ScriptLifecycle<H>,
    ) -> Result<(), Self::Error>;
}

/// Errors surfaced by [`ScriptRunner::run`]
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Activation failed; teardown still ran
    #[error("Script activation failed: {0}")]
    Activation(Box<dyn std::error::Error>),
}

/// Drives a script through load and unload against one host
pub struct ScriptRunner;

impl ScriptRunner {
    /// Activate the script, then tear it down.
    ///
    /// Teardown runs even when activation fails so handlers registered
    /// before the failure are not lost.
    pub fn run<H, S>(host: &mut H, script: &mut S) -> Result<(), ScriptError>
    where
        H: Host,
        S: Script<H>,
    {
        let mut lifecycle = ScriptLifecycle::new();

        log::info!("Activating script...");
        let activation = script.activate(host, &mut lifecycle);

        log::info!("Tearing down script...");
        lifecycle.terminate(host);

        activation.map_err(|e| ScriptError::Activation(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SandboxHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_run_once_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut lifecycle: ScriptLifecycle<SandboxHost> = ScriptLifecycle::new();

        for id in 0..3 {
            let calls = Rc::clone(&calls);
            lifecycle.on_terminate(move |_host| calls.borrow_mut().push(id));
        }
        assert_eq!(lifecycle.pending_handlers(), 3);

        let mut host = SandboxHost::new();
        assert_eq!(lifecycle.terminate(&mut host), 3);
        assert_eq!(lifecycle.terminate(&mut host), 0);

        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
        assert!(lifecycle.is_terminated());
    }

    #[test]
    fn test_registration_after_teardown_is_ignored() {
        let mut lifecycle: ScriptLifecycle<SandboxHost> = ScriptLifecycle::new();
        let mut host = SandboxHost::new();
        lifecycle.terminate(&mut host);

        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        lifecycle.on_terminate(move |_host| *flag.borrow_mut() = true);

        assert_eq!(lifecycle.pending_handlers(), 0);
        assert_eq!(lifecycle.terminate(&mut host), 0);
        assert!(!*ran.borrow());
    }
}
