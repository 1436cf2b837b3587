use tokio::sync::watch;

pub const DEFAULT_MESSAGE: &str = "Person View";

/// Bindable state behind the person view.
pub struct PersonViewModel {
    message: watch::Sender<String>,
}

impl PersonViewModel {
    pub fn new() -> Self {
        let (message, _) = watch::channel(DEFAULT_MESSAGE.to_string());
        Self { message }
    }

    pub fn message(&self) -> String {
        self.message.borrow().clone()
    }

    /// Returns `true` when the value changed; only then are subscribers woken.
    pub fn set_message(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.message.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.message.subscribe()
    }
}

impl Default for PersonViewModel {
    fn default() -> Self {
        Self::new()
    }
}
