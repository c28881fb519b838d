use std::sync::Arc;

use serde_json::Value;

use super::{
    Call, Category, ChannelState, ClientOptions, Dispatcher, Error, HttpTransport, ListenerId,
    NotificationChannel, NotificationEvent, Operation, Params, Registry, Result, Subscription,
    Token, Transport, TransportError, activation,
};

/// Client of the local API, optionally listening for pushed notifications.
///
/// Requests from one client are sent one at a time, in the order they are issued.
/// Notifications are delivered from a background task and never wait on requests.
///
/// If the notification channel was not requested or could not be set up, the
/// subscription methods do nothing and [`Client::subscribe`] returns a finished
/// [`Subscription`].
pub struct Client {
    options: ClientOptions,
    dispatcher: Dispatcher,
    registry: Arc<Registry>,
    channel: Option<NotificationChannel>,
}

impl Client {
    /// Connects over HTTP using `options`.
    ///
    /// Fails only for a malformed token; notification problems are logged and
    /// leave the client without notifications.
    pub async fn new(token: &str, options: ClientOptions) -> Result<Self> {
        let token = Token::parse(token)?;
        let transport = HttpTransport::new(&options)?;
        Ok(Self::build(token, options, transport).await)
    }

    pub async fn with_transport(
        token: &str,
        options: ClientOptions,
        transport: impl Transport + Send + Sync + 'static,
    ) -> Result<Self> {
        let token = Token::parse(token)?;
        Ok(Self::build(token, options, transport).await)
    }

    async fn build(
        token: Token,
        options: ClientOptions,
        transport: impl Transport + Send + Sync + 'static,
    ) -> Self {
        let dispatcher = Dispatcher::new(token, transport);
        let mut channel = None;
        let registry = if options.notifications {
            let registry = Arc::new(Registry::new());
            match activation::activate(&dispatcher, &options, registry.clone()).await {
                Ok(c) => channel = Some(c),
                Err(e) => {
                    tracing::warn!(error = %e, "notifications unavailable for this client");
                    registry.close();
                }
            }
            registry
        } else {
            Arc::new(Registry::closed())
        };
        Self {
            options,
            dispatcher,
            registry,
            channel,
        }
    }

    pub fn token(&self) -> &Token {
        self.dispatcher.token()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Posts a raw request. `method` defaults to `getSystemInfo`, `params` to `{}`.
    pub async fn send(
        &self,
        method: Option<&str>,
        params: Option<Params>,
    ) -> Result<Value, TransportError> {
        self.dispatcher.send(method, params).await
    }

    /// Starts a call of the table operation `name`.
    pub fn call(&self, name: &str) -> Result<Call<'_>> {
        let op = Operation::find(name).ok_or_else(|| Error::UnknownOperation(name.to_string()))?;
        Ok(Call::new(&self.dispatcher, op))
    }

    pub async fn invoke(&self, name: &str, args: Params) -> Result<Value> {
        self.call(name)?.args(args).send().await
    }

    pub fn notifications_active(&self) -> bool {
        self.channel_state() == ChannelState::Open
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel
            .as_ref()
            .map_or(ChannelState::Unopened, NotificationChannel::state)
    }

    pub fn on(
        &self,
        category: Category,
        f: impl Fn(&NotificationEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.registry.on(category, f)
    }

    pub fn once(
        &self,
        category: Category,
        f: impl Fn(&NotificationEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.registry.once(category, f)
    }

    pub fn remove_listener(&self, category: Category, id: ListenerId) -> bool {
        self.registry.remove_listener(category, id)
    }

    pub fn subscribe(&self, category: Category) -> Subscription {
        self.registry.subscribe(category)
    }

    /// Resolves when the notification channel is closed, immediately if there is none.
    pub async fn closed(&self) {
        if let Some(channel) = &self.channel {
            channel.closed().await;
        }
    }

    /// Closes the notification channel. Outstanding requests are unaffected.
    pub async fn close(&mut self) {
        if let Some(channel) = &mut self.channel {
            channel.close().await;
        }
        self.registry.close();
    }
}
