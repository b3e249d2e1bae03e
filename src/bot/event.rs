//! Transport-neutral event model.
//!
//! The transport turns whatever it receives into an [`InboundEvent`] and turns
//! every [`Outbound`] the router produces back into its own API calls.

use crate::game::Grid;
use crate::storage::PlayerId;

/// Callback token of the welcome "begin" button.
pub const BEGIN_TOKEN: &str = "start_game";
/// Prefix of every map-cell callback token (`cell_<row>-<col>`).
pub const CELL_PREFIX: &str = "cell_";

/// Chat the event came from and replies go to.
pub type ChatId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub sender: PlayerId,
    pub chat: ChatId,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `/name args`; name is lower-cased with any `@botname` suffix removed.
    Command { name: String, args: String },
    /// Any non-command text.
    Text(String),
    /// Button press.
    Callback {
        id: String,
        token: String,
        /// Message that carried the pressed button, when the transport knows it.
        message_id: Option<i64>,
    },
}

impl EventKind {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Command { .. } => "command",
            EventKind::Text(_) => "text",
            EventKind::Callback { .. } => "callback",
        }
    }
}

/// Split a `/command@bot args` line. Returns `None` for ordinary text.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_lowercase(), args.to_string()))
}

impl InboundEvent {
    /// Classify a raw chat message as command or free text.
    pub fn from_text(sender: PlayerId, chat: ChatId, text: &str) -> Self {
        let kind = match parse_command(text) {
            Some((name, args)) => EventKind::Command { name, args },
            None => EventKind::Text(text.to_string()),
        };
        Self { sender, chat, kind }
    }
}

/// A clickable affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Rows of buttons attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn single(button: Button) -> Self {
        Self {
            rows: vec![vec![button]],
        }
    }

    /// One button per cell, labelled `"<row>-<col>"`, token `"cell_<row>-<col>"`.
    pub fn for_grid(grid: &Grid) -> Self {
        let n = grid.size();
        let rows = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| {
                        let coord = CellCoord { row: r, col: c };
                        Button::new(coord.label(), coord.token())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// A map coordinate carried in a callback token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    /// Parse `cell_<row>-<col>` where both parts are plain decimal digits.
    pub fn parse(token: &str) -> Option<Self> {
        let rest = token.strip_prefix(CELL_PREFIX)?;
        let (row, col) = rest.split_once('-')?;
        Some(Self {
            row: parse_digits(row)?,
            col: parse_digits(col)?,
        })
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    pub fn token(&self) -> String {
        format!("{}{}", CELL_PREFIX, self.label())
    }
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Something the transport should do on the router's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message {
        chat: ChatId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    /// Acknowledge a button press, optionally with a toast.
    AnswerCallback { id: String, text: Option<String> },
    /// Replace the text of an earlier message (drops its keyboard).
    EditMessage {
        chat: ChatId,
        message_id: i64,
        text: String,
    },
}

impl Outbound {
    pub fn message(chat: ChatId, text: impl Into<String>) -> Self {
        Outbound::Message {
            chat,
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(chat: ChatId, text: impl Into<String>, keyboard: Keyboard) -> Self {
        Outbound::Message {
            chat,
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Text carried by this action, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Outbound::Message { text, .. } | Outbound::EditMessage { text, .. } => Some(text),
            Outbound::AnswerCallback { text, .. } => text.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{map, Terrain};

    #[test]
    fn commands_are_split_from_text() {
        assert_eq!(parse_command("/start"), Some(("start".into(), "".into())));
        assert_eq!(
            parse_command("/Show_Map@EmpireBot  now "),
            Some(("show_map".into(), "now".into()))
        );
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/@bot"), None);
    }

    #[test]
    fn from_text_classifies() {
        let ev = InboundEvent::from_text(PlayerId::from("1"), 1, "Aragorn");
        assert_eq!(ev.kind, EventKind::Text("Aragorn".into()));
        let ev = InboundEvent::from_text(PlayerId::from("1"), 1, "/stats");
        assert!(matches!(ev.kind, EventKind::Command { ref name, .. } if name == "stats"));
    }

    #[test]
    fn cell_tokens_parse_strictly() {
        assert_eq!(CellCoord::parse("cell_0-0"), Some(CellCoord { row: 0, col: 0 }));
        assert_eq!(CellCoord::parse("cell_9-12"), Some(CellCoord { row: 9, col: 12 }));
        for bad in ["cell_", "cell_1", "cell_-1-2", "cell_+1-2", "cell_1-2-3", "cell_a-b", "start_game", "cell_1- 2"] {
            assert_eq!(CellCoord::parse(bad), None, "{bad}");
        }
    }

    #[test]
    fn grid_keyboard_matches_grid() {
        let grid = map::generate(10, &Terrain::ALL).unwrap();
        let kb = Keyboard::for_grid(&grid);
        assert_eq!(kb.rows.len(), 10);
        assert_eq!(kb.button_count(), 100);
        assert_eq!(kb.rows[3][7], Button::new("3-7", "cell_3-7"));
        for (r, row) in kb.rows.iter().enumerate() {
            for (c, b) in row.iter().enumerate() {
                assert_eq!(CellCoord::parse(&b.token), Some(CellCoord { row: r, col: c }));
            }
        }
    }
}
