use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use uuid::Uuid;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}
impl ToastKind {
    pub const ALL: [ToastKind; 4] = [
        ToastKind::Success,
        ToastKind::Error,
        ToastKind::Warning,
        ToastKind::Info,
    ];

    /// Background class used to color the toast.
    pub fn background_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-success",
            ToastKind::Error => "bg-danger",
            ToastKind::Warning => "bg-warning",
            ToastKind::Info => "bg-info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}
impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
// Unknown tags are shown with info styling rather than rejected
impl std::str::FromStr for ToastKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
}
impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        }
    }

    pub fn class_name(&self) -> String {
        format!(
            "toast align-items-center text-white {} border-0",
            self.kind.background_class()
        )
    }

    /// Markup for a dismissible toast: the message body and a close button.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div id="toast-{id}" class="{class}" role="alert">"#,
                r#"<div class="d-flex">"#,
                r#"<div class="toast-body">{message}</div>"#,
                r#"<button type="button" class="btn-close btn-close-white me-2 m-auto" data-bs-dismiss="toast"></button>"#,
                "</div></div>"
            ),
            id = self.id,
            class = self.class_name(),
            message = escape_html(&self.message),
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// The element toasts are stacked in.
pub trait ToastContainer: Send + Sync {
    fn append(&self, toast: &Toast);
    fn remove(&self, id: Uuid);
}

/// Drives a toast's show/hide animation. `on_hidden` must be called once the
/// toast has finished hiding.
pub trait ToastWidget: Send + Sync {
    fn show(&self, toast: &Toast, on_hidden: Box<dyn FnOnce() + Send>);
}

pub struct Notifier {
    container: Option<Arc<dyn ToastContainer>>,
    widget: Arc<dyn ToastWidget>,
}
impl Notifier {
    pub fn new(container: Option<Arc<dyn ToastContainer>>, widget: Arc<dyn ToastWidget>) -> Self {
        Self { container, widget }
    }

    pub fn show_toast(&self, message: &str, kind: ToastKind) {
        let Some(container) = &self.container else {
            tracing::warn!("Toast container not found");
            return;
        };

        let toast = Toast::new(message, kind);
        container.append(&toast);
        self.widget.show(
            &toast,
            Box::new({
                let container = container.clone();
                let id = toast.id;
                move || container.remove(id)
            }),
        );
    }
}

#[derive(Default)]
pub struct MemoryToastContainer {
    toasts: RwLock<Vec<Toast>>,
}
impl MemoryToastContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl ToastContainer for MemoryToastContainer {
    fn append(&self, toast: &Toast) {
        self.toasts.write().unwrap().push(toast.clone());
    }

    fn remove(&self, id: Uuid) {
        self.toasts.write().unwrap().retain(|t| t.id != id);
    }
}

/// Logs the toast when shown and hides it after a fixed delay on the tokio runtime.
pub struct TimedToastWidget {
    delay: Duration,
    runtime: tokio::runtime::Handle,
}
impl TimedToastWidget {
    pub fn new(delay: Duration, runtime: tokio::runtime::Handle) -> Self {
        Self { delay, runtime }
    }
}
impl ToastWidget for TimedToastWidget {
    fn show(&self, toast: &Toast, on_hidden: Box<dyn FnOnce() + Send>) {
        match toast.kind {
            ToastKind::Error => tracing::error!("{}", toast.message),
            ToastKind::Warning => tracing::warn!("{}", toast.message),
            ToastKind::Success | ToastKind::Info => tracing::info!("{}", toast.message),
        }

        let delay = self.delay;
        let id = toast.id;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Toast {id} hidden");
            on_hidden();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records shown toasts and lets the test decide when they hide.
    #[derive(Default)]
    struct ManualWidget {
        shown: Mutex<Vec<(Toast, Box<dyn FnOnce() + Send>)>>,
    }
    impl ToastWidget for ManualWidget {
        fn show(&self, toast: &Toast, on_hidden: Box<dyn FnOnce() + Send>) {
            self.shown.lock().unwrap().push((toast.clone(), on_hidden));
        }
    }
    impl ManualWidget {
        fn hide_first(&self) {
            let (_, on_hidden) = self.shown.lock().unwrap().remove(0);
            on_hidden();
        }
    }

    #[test]
    fn test_kind_parsing_falls_back_to_info() {
        assert_eq!("success".parse::<ToastKind>(), Ok(ToastKind::Success));
        assert_eq!("error".parse::<ToastKind>(), Ok(ToastKind::Error));
        assert_eq!("warning".parse::<ToastKind>(), Ok(ToastKind::Warning));
        assert_eq!("info".parse::<ToastKind>(), Ok(ToastKind::Info));
        assert_eq!("danger".parse::<ToastKind>(), Ok(ToastKind::Info));
        assert_eq!("".parse::<ToastKind>(), Ok(ToastKind::Info));
    }

    #[test]
    fn test_background_classes() {
        let classes: Vec<_> = ToastKind::ALL.iter().map(|k| k.background_class()).collect();
        assert_eq!(classes, ["bg-success", "bg-danger", "bg-warning", "bg-info"]);
    }

    #[test]
    fn test_html_escapes_message() {
        let toast = Toast::new("<b>Saved</b> & done", ToastKind::Success);
        let html = toast.to_html();
        assert!(html.contains("toast align-items-center text-white bg-success border-0"));
        assert!(html.contains("&lt;b&gt;Saved&lt;/b&gt; &amp; done"));
        assert!(html.contains(r#"data-bs-dismiss="toast""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_missing_container_is_a_noop() {
        let widget = Arc::new(ManualWidget::default());
        let notifier = Notifier::new(None, widget.clone());
        notifier.show_toast("hello", ToastKind::Info);
        assert!(widget.shown.lock().unwrap().is_empty());
    }

    #[test]
    fn test_toasts_stack_and_remove_when_hidden() {
        let container = Arc::new(MemoryToastContainer::new());
        let widget = Arc::new(ManualWidget::default());
        let notifier = Notifier::new(Some(container.clone()), widget.clone());

        notifier.show_toast("same", ToastKind::Info);
        notifier.show_toast("same", ToastKind::Info);
        notifier.show_toast("oops", ToastKind::Error);
        assert_eq!(container.len(), 3);

        widget.hide_first();
        let remaining = container.toasts();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].message, "same");
        assert_eq!(remaining[1].kind, ToastKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_widget_hides_after_delay() {
        let container = Arc::new(MemoryToastContainer::new());
        let widget = Arc::new(TimedToastWidget::new(
            Duration::from_secs(5),
            tokio::runtime::Handle::current(),
        ));
        let notifier = Notifier::new(Some(container.clone()), widget);

        notifier.show_toast("Saved", ToastKind::Success);
        assert_eq!(container.len(), 1);

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert_eq!(container.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(container.is_empty());
    }
}
