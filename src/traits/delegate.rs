//! Host lifecycle hooks.
//!
//! A platform binding calls these methods as the host reports transitions.
//! Every method has an empty default so partial delegates (a forwarding
//! target that only cares about termination, say) stay short.

/// Application-level lifecycle hooks.
pub trait ApplicationDelegate: Send + Sync {
    /// The application became the active foreground application.
    fn did_become_active(&self) {}

    /// The application is about to stop receiving events (incoming call,
    /// system prompt, notification center).
    fn will_resign_active(&self) {}

    /// The application moved to the background.
    fn did_enter_background(&self) {}

    /// The application is about to be terminated.
    fn will_terminate(&self) {}
}

/// Visibility hooks of a single view.
pub trait ViewLifecycleDelegate: Send + Sync {
    fn view_will_appear(&self) {}

    fn view_did_appear(&self) {}

    fn view_will_disappear(&self) {}

    fn view_did_disappear(&self) {}
}
