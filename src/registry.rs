use std::{
    collections::HashMap,
    fmt,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard},
    task::{Context, Poll},
};

use futures::Stream;
use tokio::sync::mpsc;

use super::{Category, Error, NotificationEvent, Result, classify};


pub type Listener = Arc<dyn Fn(&NotificationEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone)]
enum Sink {
    Callback(Listener),
    Queue(mpsc::UnboundedSender<NotificationEvent>),
}
impl Sink {
    fn is_dead(&self) -> bool {
        match self {
            Sink::Callback(_) => false,
            Sink::Queue(tx) => tx.is_closed(),
        }
    }
    fn deliver(&self, event: &NotificationEvent) {
        match self {
            Sink::Callback(f) => f(event),
            Sink::Queue(tx) => {
                let _ = tx.send(event.clone());
            }
        }
    }
}

struct Entry {
    id: ListenerId,
    once: bool,
    sink: Sink,
}

struct RegistryState {
    entries: HashMap<Category, Vec<Entry>>,
    next_id: u64,
    closed: bool,
}
impl RegistryState {
    fn insert(&mut self, category: Category, once: bool, sink: Sink) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        if !self.closed {
            self.entries
                .entry(category)
                .or_default()
                .push(Entry { id, once, sink });
        }
        id
    }
}

/// Subscribers of each notification [`Category`].
///
/// Once closed, the registry drops every subscriber and ignores new ones:
/// `on` still hands out an id, and `subscribe` returns a [`Subscription`] that
/// is already finished.
pub struct Registry(Mutex<RegistryState>);

impl Registry {
    pub fn new() -> Self {
        Self(Mutex::new(RegistryState {
            entries: HashMap::new(),
            next_id: 0,
            closed: false,
        }))
    }
    /// A registry for a client without a notification channel.
    pub fn closed() -> Self {
        let r = Self::new();
        r.close();
        r
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn on(
        &self,
        category: Category,
        f: impl Fn(&NotificationEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.lock().insert(category, false, Sink::Callback(Arc::new(f)))
    }
    pub fn once(
        &self,
        category: Category,
        f: impl Fn(&NotificationEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.lock().insert(category, true, Sink::Callback(Arc::new(f)))
    }
    pub fn remove_listener(&self, category: Category, id: ListenerId) -> bool {
        let mut s = self.lock();
        let Some(list) = s.entries.get_mut(&category) else {
            return false;
        };
        let len = list.len();
        list.retain(|e| e.id != id);
        len != list.len()
    }
    pub fn subscribe(&self, category: Category) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(category, false, Sink::Queue(tx));
        Subscription { category, rx }
    }
    pub fn listener_count(&self, category: Category) -> usize {
        self.lock().entries.get(&category).map_or(0, Vec::len)
    }
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Delivers `event` to every matching subscriber and returns how many were reached.
    ///
    /// Subscribers are collected under the lock and invoked after it is released,
    /// so a callback may subscribe or unsubscribe without deadlocking.
    pub fn dispatch(&self, event: &NotificationEvent) -> usize {
        let mut targets = Vec::new();
        {
            let mut s = self.lock();
            if s.closed {
                return 0;
            }
            for category in classify(&event.ty) {
                let Some(list) = s.entries.get_mut(&category) else {
                    continue;
                };
                list.retain(|e| {
                    if e.sink.is_dead() {
                        return false;
                    }
                    targets.push(e.sink.clone());
                    !e.once
                });
            }
        }
        for sink in &targets {
            sink.deliver(event);
        }
        targets.len()
    }

    pub fn close(&self) {
        let mut s = self.lock();
        s.closed = true;
        s.entries.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.lock();
        f.debug_struct("Registry")
            .field("closed", &s.closed)
            .field(
                "listeners",
                &s.entries.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

/// Pull-based view of one category.
///
/// Yields events in arrival order until the notification channel closes.
#[derive(Debug)]
pub struct Subscription {
    category: Category,
    rx: mpsc::UnboundedReceiver<NotificationEvent>,
}

impl Subscription {
    pub fn category(&self) -> Category {
        self.category
    }
    /// Waits for the next event, failing with [`Error::ChannelClosed`] once the channel is gone.
    pub async fn recv(&mut self) -> Result<NotificationEvent> {
        self.rx.recv().await.ok_or(Error::ChannelClosed)
    }
}

impl Stream for Subscription {
    type Item = NotificationEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
