use parse_display::{Display, FromStr};


/// Bucket of notification subscribers.
///
/// Displays and parses as the camelCase name used on the wire, e.g. `newInstantMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromStr)]
#[display(style = "camelCase")]
pub enum Category {
    /// Every event.
    Any,
    NewOutgoingChannelMessage,
    NewChannelMessage,
    NewOutgoingInstantMessage,
    NewInstantMessage,
    Message,
    ChannelJoinChanged,
    NewPaymentTransfer,
    NewEmail,
    /// Any event whose type mentions "outgoing".
    OutgoingMessage,
    /// Any event whose type mentions "incoming".
    IncomingMessage,
}

impl Category {
    /// Categories matched by an event's `type` verbatim.
    pub const EXACT: [Category; 8] = [
        Category::NewOutgoingChannelMessage,
        Category::NewChannelMessage,
        Category::NewOutgoingInstantMessage,
        Category::NewInstantMessage,
        Category::Message,
        Category::ChannelJoinChanged,
        Category::NewPaymentTransfer,
        Category::NewEmail,
    ];

    fn exact(ty: &str) -> Option<Self> {
        Self::EXACT.into_iter().find(|c| c.to_string() == ty)
    }
}

/// Categories an event of type `ty` is delivered to, in delivery order.
///
/// A category appears at most once, so an event typed `message` reaches
/// `Message` subscribers a single time.
pub fn classify(ty: &str) -> Vec<Category> {
    let mut categories = vec![Category::Any];
    let mut push = |c| {
        if !categories.contains(&c) {
            categories.push(c);
        }
    };
    if let Some(c) = Category::exact(ty) {
        push(c);
    }
    let lower = ty.to_lowercase();
    if lower.contains("outgoing") {
        push(Category::OutgoingMessage);
    }
    if lower.contains("incoming") {
        push(Category::IncomingMessage);
    }
    if lower.contains("message") {
        push(Category::Message);
    }
    categories
}
