//! Guest interactions typed on stdin

/// A guest action on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// "Buka Undangan": close the gate
    Open,
    /// "Putar Musik" on the gate: close it and start the music
    OpenWithMusic,
    /// The floating play/pause button
    Toggle,
    /// Simulate the audio failing to load
    FailAudio,
    Status,
    Quit,
}

impl Interaction {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "open" | "buka" => Some(Self::Open),
            "play" | "putar" => Some(Self::OpenWithMusic),
            "toggle" | "t" => Some(Self::Toggle),
            "fail" => Some(Self::FailAudio),
            "status" | "s" => Some(Self::Status),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}
