//! Canned-response chat companion.
//!
//! Replies are picked from fixed buckets by first-match keyword containment.
//! There is no memory between turns: the transcript is display state only.

use std::time::Duration;

use chrono::NaiveTime;
use folio::prng::RandomSource;
use serde::{Deserialize, Serialize};

/// Input category, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Greeting,
    Sadness,
    Anxiety,
    Fallback,
}

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const SADNESS_KEYWORDS: &[&str] = &["sad", "depressed", "unhappy", "lonely"];
const ANXIETY_KEYWORDS: &[&str] = &["anxious", "anxiety", "stress", "worried", "nervous", "panic"];

const GREETING_REPLIES: &[&str] = &[
    "Hello! How are you feeling today?",
    "Hi there! What's on your mind?",
    "Hey! I'm here to listen. How has your day been?",
];

const SADNESS_REPLIES: &[&str] = &[
    "I'm sorry you're feeling this way. Would you like to talk about what's bothering you?",
    "It's okay to feel sad sometimes. What do you think brought this on?",
    "That sounds hard. Remember that reaching out to someone you trust can help.",
];

const ANXIETY_REPLIES: &[&str] = &[
    "Try taking a slow, deep breath. What's making you feel anxious?",
    "Stress can feel overwhelming. Breaking things into smaller steps sometimes helps.",
    "It sounds like a lot is weighing on you. What's the biggest worry right now?",
];

const FALLBACK_REPLIES: &[&str] = &[
    "Tell me more about that.",
    "How does that make you feel?",
    "I'm listening. Go on.",
    "Thanks for sharing. What else is on your mind?",
];

/// Opening line shown when a transcript starts with a greeting.
pub const OPENING_LINE: &str = "Hi, I'm a simple support bot. How are you feeling today?";

impl Category {
    pub const ORDER: [Category; 4] = [
        Category::Greeting,
        Category::Sadness,
        Category::Anxiety,
        Category::Fallback,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => GREETING_KEYWORDS,
            Category::Sadness => SADNESS_KEYWORDS,
            Category::Anxiety => ANXIETY_KEYWORDS,
            Category::Fallback => &[],
        }
    }

    pub fn bucket(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => GREETING_REPLIES,
            Category::Sadness => SADNESS_REPLIES,
            Category::Anxiety => ANXIETY_REPLIES,
            Category::Fallback => FALLBACK_REPLIES,
        }
    }
}

/// First category with a keyword contained in `text` (case-insensitive).
///
/// Containment is plain substring matching, so "this" counts as "hi".
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    Category::ORDER
        .into_iter()
        .find(|c| c.keywords().iter().any(|k| lower.contains(k)))
        .unwrap_or(Category::Fallback)
}

/// Pick a reply for `text`, uniformly from its category's bucket.
pub fn respond(text: &str, rng: &mut impl RandomSource) -> &'static str {
    let bucket = classify(text).bucket();
    bucket[rng.gen_range_usize(0, bucket.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    pub at: NaiveTime,
}

impl ChatEntry {
    /// Local time-of-day as shown under a chat bubble.
    pub fn timestamp(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

/// A reply that has been chosen but not shown yet.
///
/// Deliberately not `Clone`: each submission yields exactly one reply.
#[derive(Debug, PartialEq)]
#[must_use = "a pending reply must be delivered to complete the exchange"]
pub struct PendingReply {
    text: &'static str,
    delay: Duration,
}

impl PendingReply {
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// How long the host waits before calling [`ChatSession::deliver`].
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, sender: Sender, text: impl Into<String>, at: NaiveTime) {
        self.entries.push(ChatEntry {
            sender,
            text: text.into(),
            at,
        });
    }
}

/// One chat widget: transcript plus the reply delay.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    reply_delay: Duration,
    awaiting: usize,
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            transcript: Transcript::default(),
            reply_delay,
            awaiting: 0,
        }
    }

    /// A session whose transcript opens with [`OPENING_LINE`].
    pub fn with_greeting(reply_delay: Duration, now: NaiveTime) -> Self {
        let mut s = Self::new(reply_delay);
        s.transcript.push(Sender::Assistant, OPENING_LINE, now);
        s
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Replies chosen but not yet delivered ("typing" indicator).
    pub fn awaiting_replies(&self) -> usize {
        self.awaiting
    }

    /// Record the user's message and choose the reply.
    ///
    /// Blank input is ignored and appends nothing.
    pub fn submit(
        &mut self,
        text: &str,
        now: NaiveTime,
        rng: &mut impl RandomSource,
    ) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(Sender::User, text, now);
        self.awaiting += 1;
        Some(PendingReply {
            text: respond(text, rng),
            delay: self.reply_delay,
        })
    }

    /// Show a reply once its delay has elapsed.
    pub fn deliver(&mut self, reply: PendingReply, now: NaiveTime) -> &ChatEntry {
        self.awaiting = self.awaiting.saturating_sub(1);
        self.transcript.push(Sender::Assistant, reply.text, now);
        let last = self.transcript.entries.len() - 1;
        &self.transcript.entries[last]
    }
}
