//! Hotspot behaviors
//!
//! Every map object name is resolved once, when its room is loaded, into a
//! [`ZoneBehavior`]. Clicking a zone never looks at its name again.
//!
//! Deferred work (choice buttons, password puzzle callbacks) is expressed as
//! a list of [`Command`]s that the scene controller applies.

/// Delay between the vault message and the keypad appearing
pub const VAULT_PUZZLE_DELAY_MS: u32 = 3000;

/// Where a navigation goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// One of the standard rooms (1-based)
    Room(u8),
    /// A map outside the room cycle, with its background
    CustomMap {
        map: &'static str,
        background: &'static str,
    },
}

/// Password puzzle parameters attached to a hotspot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub password: &'static str,
    /// Text shown right away, before the keypad opens
    pub intro: &'static str,
    pub delay_ms: u32,
    /// Applied after the correct code was entered
    pub on_success: Vec<Command>,
}

/// What clicking a zone does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneBehavior {
    ShowDialog { text: &'static str },
    /// Text box with "[Abrir]" / "[Fechar]"; open navigates to `open`
    ShowChoice { text: &'static str, open: NavTarget },
    StartPasswordPuzzle(PasswordConfig),
    StartImagePuzzle,
    NavigateTo(NavTarget),
    Noop,
}

impl ZoneBehavior {
    /// True if this behavior replaces the room with a puzzle overlay right away
    pub fn opens_puzzle(&self) -> bool {
        matches!(self, ZoneBehavior::StartImagePuzzle)
    }

    /// True if clicking does anything at all (drives the hand cursor)
    pub fn is_interactive(&self) -> bool {
        !matches!(self, ZoneBehavior::Noop)
    }
}

/// Deferred scene action. Text fields are i18n keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowMessage(&'static str),
    HideTextBox,
    Navigate(NavTarget),
    AddItem(&'static str),
}

/// Resolve a map object name to its behavior
pub fn resolve(name: &str) -> ZoneBehavior {
    match name {
        "caixa pequena" => ZoneBehavior::ShowChoice {
            text: "msg_small_box",
            open: caixa_clara(),
        },
        "caixa grande" => ZoneBehavior::ShowChoice {
            text: "msg_large_box",
            open: caixa_clara(),
        },
        "cofre_trancado" => ZoneBehavior::StartPasswordPuzzle(PasswordConfig {
            password: "124",
            intro: "msg_vault_locked",
            delay_ms: VAULT_PUZZLE_DELAY_MS,
            on_success: vec![
                Command::ShowMessage("msg_vault_opened"),
                Command::AddItem("pincel"),
            ],
        }),
        "quadro_puzzle" => ZoneBehavior::StartImagePuzzle,
        "voltar" => ZoneBehavior::NavigateTo(NavTarget::Room(1)),
        "foto" => ZoneBehavior::ShowDialog { text: "msg_photo" },
        "carta" => ZoneBehavior::ShowDialog { text: "msg_letter" },
        other => {
            tracing::debug!("No behavior for '{}', tooltip only", other);
            ZoneBehavior::Noop
        }
    }
}

fn caixa_clara() -> NavTarget {
    NavTarget::CustomMap {
        map: "caixaclara",
        background: "caixaclara",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxes_offer_choice_into_caixaclara() {
        for name in ["caixa pequena", "caixa grande"] {
            match resolve(name) {
                ZoneBehavior::ShowChoice { open, .. } => assert_eq!(open, caixa_clara()),
                other => panic!("{} resolved to {:?}", name, other),
            }
        }
    }

    #[test]
    fn vault_uses_three_digit_code() {
        let ZoneBehavior::StartPasswordPuzzle(cfg) = resolve("cofre_trancado") else {
            panic!("vault is not a password puzzle");
        };
        assert_eq!(cfg.password, "124");
        assert_eq!(cfg.delay_ms, 3000);
        assert!(cfg.on_success.contains(&Command::AddItem("pincel")));
    }

    #[test]
    fn voltar_returns_to_first_room() {
        assert_eq!(resolve("voltar"), ZoneBehavior::NavigateTo(NavTarget::Room(1)));
    }

    #[test]
    fn unknown_names_are_noop() {
        assert_eq!(resolve("cama"), ZoneBehavior::Noop);
        assert_eq!(resolve(""), ZoneBehavior::Noop);
        assert!(!resolve("cama").is_interactive());
        assert!(resolve("quadro_puzzle").opens_puzzle());
        assert!(!resolve("cofre_trancado").opens_puzzle());
    }
}
