use serde_json::Value;

/// Selection of event logs, either by an inclusive block range or by a single
/// block hash.
///
/// When `block_hash` is set the range bounds are ignored. Without a hash both
/// `from_block` and `to_block` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub block_hash: Option<String>,
    pub addresses: Vec<String>,
    pub topics: Vec<TopicFilter>,
}

impl LogFilter {
    pub fn range(from_block: u64, to_block: u64) -> Self {
        Self {
            from_block: Some(from_block),
            to_block: Some(to_block),
            ..Self::default()
        }
    }

    pub fn at_block(number: u64) -> Self {
        Self::range(number, number)
    }

    pub fn at_hash(hash: impl Into<String>) -> Self {
        Self {
            block_hash: Some(hash.into()),
            ..Self::default()
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }

    /// Appends the constraint for the next topic position.
    pub fn topic(mut self, topic: TopicFilter) -> Self {
        self.topics.push(topic);
        self
    }
}

/// Constraint on one topic position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    /// Wildcard; encoded as `null`.
    Any,
    Exact(String),
    /// Matches any of the listed hashes.
    OneOf(Vec<String>),
}

impl From<&TopicFilter> for Value {
    fn from(topic: &TopicFilter) -> Self {
        match topic {
            TopicFilter::Any => Value::Null,
            TopicFilter::Exact(topic) => Value::from(topic.as_str()),
            TopicFilter::OneOf(topics) => Value::from(topics.clone()),
        }
    }
}
