use {
    std::{
        cell::{Cell, RefCell},
        time::Duration,
    },
    yew::Callback,
};

/// Time given to the css fade out before the notification leaves the DOM.
const FADE_OUT: Duration = Duration::from_millis(100);

thread_local! {
    static CALLBACK: RefCell<Option<Callback<Notification>>> = const { RefCell::new(None) };
    static NEXT_ID: Cell<u32> = const { Cell::new(0) };
}

/// Shows a notification if a manager is mounted, otherwise it's dropped.
pub fn push_notification(notification: Notification) {
    CALLBACK.with_borrow(|cb_opt| {
        let Some(cb) = cb_opt else {
            debug!("No notification manager mounted, dropping '{}'", notification.title);
            return;
        };
        cb.emit(notification)
    });
}

fn new_id() -> u32 {
    NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    })
}

pub enum Message {
    Push(Notification),
    Expire { id: u32 },
    Remove { id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationStyle {
    Info,
    Error,
}

#[derive(Debug, PartialEq)]
pub struct Notification {
    id: u32,
    expired: bool,
    timeout: Duration,
    title: String,
    content: Vec<String>,
    style: NotificationStyle,
}

impl Notification {
    pub fn new(
        title: &str,
        content: Vec<String>,
        timeout: Duration,
        style: NotificationStyle,
    ) -> Self {
        Self {
            id: new_id(),
            expired: false,
            timeout,
            title: title.to_string(),
            content,
            style,
        }
    }

    pub fn info(title: &str, content: Vec<String>, timeout: Duration) -> Self {
        Self::new(title, content, timeout, NotificationStyle::Info)
    }

    pub fn error(title: &str, content: Vec<String>, timeout: Duration) -> Self {
        Self::new(title, content, timeout, NotificationStyle::Error)
    }

    fn class_name(&self) -> String {
        format!(
            "notification{}{}",
            if self.expired { " notification_expired" } else { "" },
            match self.style {
                NotificationStyle::Info => " notification_info",
                NotificationStyle::Error => " notification_error",
            }
        )
    }

    fn render(&self) -> yew::Html {
        yew::html! {<div class={self.class_name()}>
            <div class="notification_title">{ &self.title }</div>
            <div class="notification_content">{
                for self.content.iter().map(|line| yew::html! {<>{ line }<br /></>})
            }</div>
        </div>}
    }
}

pub struct NotificationManager {
    notifications: Vec<Notification>,
}

impl yew::Component for NotificationManager {
    type Message = Message;
    type Properties = ();

    fn create(ctx: &yew::Context<Self>) -> Self {
        CALLBACK.set(Some(ctx.link().callback(Message::Push)));
        Self {
            notifications: Vec::new(),
        }
    }

    fn update(&mut self, ctx: &yew::Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::Push(notification) => {
                let (id, timeout) = (notification.id, notification.timeout);
                ctx.link().send_future(async move {
                    gloo_timers::future::sleep(timeout).await;
                    Message::Expire { id }
                });
                self.notifications.push(notification);
                true
            }
            Message::Expire { id } => {
                let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
                    warn!("Notification {id} expired but isn't displayed");
                    return false;
                };
                notification.expired = true;
                ctx.link().send_future(async move {
                    gloo_timers::future::sleep(FADE_OUT).await;
                    Message::Remove { id }
                });
                true
            }
            Message::Remove { id } => {
                self.notifications.retain(|n| n.id != id);
                true
            }
        }
    }

    fn view(&self, _ctx: &yew::Context<Self>) -> yew::Html {
        yew::html! {<div class="notification_block">{
            for self.notifications.iter().map(Notification::render)
        }</div>}
    }

    fn destroy(&mut self, _ctx: &yew::Context<Self>) {
        CALLBACK.set(None);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{Notification, NotificationStyle},
        std::time::Duration,
    };

    #[test]
    fn ids_are_unique() {
        let first = Notification::info("a", Vec::new(), Duration::from_secs(1));
        let second = Notification::info("b", Vec::new(), Duration::from_secs(1));

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn style_shows_in_the_class() {
        let mut notification = Notification::error(
            "Upload failed",
            vec![String::from("boom")],
            Duration::from_secs(5),
        );
        assert_eq!(notification.style, NotificationStyle::Error);
        assert_eq!(notification.class_name(), "notification notification_error");

        notification.expired = true;
        assert_eq!(
            notification.class_name(),
            "notification notification_expired notification_error"
        );
    }
}
