//! Plain-text rendering of the invitation

use crate::{
    invitation::Invitation,
    state::{PresentationState, RemainingDuration},
};

pub const COUPLE: &str = "Zulfiqar & Yurin";

const RULE: &str = "==============================================";

/// The guest modal shown before the invitation is opened
pub fn render_gate(invitation: &Invitation) -> String {
    let guest = format!("  {}", invitation.guest.guest_name);
    [
        RULE,
        "              Selamat Datang",
        "",
        "  Kepada Yth:",
        guest.as_str(),
        "",
        "  Aktifkan musik untuk pengalaman undangan yang lebih menyentuh hati.",
        "  [open] Buka Undangan    [play] Putar Musik",
        "",
        "  Mohon Maaf Apabila Ada Kesalahan Penulisan Nama ataupun Gelar",
        RULE,
    ]
    .join("\n")
}

/// The invitation content revealed once the gate is closed
pub fn render_content(invitation: &Invitation) -> String {
    let event = &invitation.event;
    let when = invitation
        .target
        .moment()
        .map(|moment| {
            moment
                .with_timezone(&crate::state::target::venue_offset())
                .format("%-d %B %Y, %H:%M WIB")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());

    format!(
        "  {}\n\n  {}: {}\n  Tempat: {}\n  Peta: {}",
        COUPLE, event.venue_label, when, event.venue_name, event.map_url
    )
}

/// One countdown line
pub fn render_countdown(remaining: &RemainingDuration) -> String {
    format!("  {}", remaining)
}

/// Playback control and popup line
pub fn render_status(state: &PresentationState) -> String {
    let control = match (state.audio_ready_for_play(), state.is_playing) {
        (false, _) => "[musik belum siap]",
        (true, true) => "[toggle] Jeda Musik",
        (true, false) => "[toggle] Putar Musik",
    };
    if state.popup_visible() {
        format!("  {}  ~ Putar musik latar? ~", control)
    } else {
        format!("  {}", control)
    }
}
