//! Internationalization: UI text translations for Portuguese and English.
//!
//! Map object names (tooltips) are shown verbatim; this module only handles
//! engine-drawn text: dialog lines, buttons, keypad feedback, HUD labels and
//! the escape menu.

pub use memorias_common::Language;

/// All translatable UI strings, looked up by key.
/// Returns the translated string or "???" if the key is not found.
pub fn t(lang: Language, key: &str) -> &'static str {
    match (lang, key) {
        // ── Escape / Pause menu ──
        (Language::Portuguese, "pause_title") => "= PAUSA =",
        (Language::English, "pause_title") => "= PAUSED =",
        (Language::Portuguese, "menu_resume") => "Continuar",
        (Language::English, "menu_resume") => "Resume",
        (Language::Portuguese, "menu_language") => "Idioma",
        (Language::English, "menu_language") => "Language",
        (Language::Portuguese, "menu_fullscreen") => "Tela cheia",
        (Language::English, "menu_fullscreen") => "Toggle Fullscreen",
        (Language::Portuguese, "menu_quit") => "Sair do jogo",
        (Language::English, "menu_quit") => "Quit",
        (Language::Portuguese, "pause_hint") => "Setas + Enter | Esc",
        (Language::English, "pause_hint") => "Arrow keys + Enter | Esc",

        // ── Text box buttons ──
        (Language::Portuguese, "btn_open") => "[Abrir]",
        (Language::English, "btn_open") => "[Open]",
        (Language::Portuguese, "btn_close") => "[Fechar]",
        (Language::English, "btn_close") => "[Close]",
        (Language::Portuguese, "btn_exit") => "[Sair]",
        (Language::English, "btn_exit") => "[Exit]",

        // ── Keypad ──
        (Language::Portuguese, "key_clear") => "CLR",
        (Language::English, "key_clear") => "CLR",
        (Language::Portuguese, "key_ok") => "OK",
        (Language::English, "key_ok") => "OK",
        (Language::Portuguese, "pw_cleared") => "Entrada limpa.",
        (Language::English, "pw_cleared") => "Input cleared.",
        (Language::Portuguese, "pw_max_digits") => "Máximo de dígitos alcançado.",
        (Language::English, "pw_max_digits") => "Maximum digits reached.",
        (Language::Portuguese, "pw_correct") => "SENHA CORRETA! O objeto foi desbloqueado.",
        (Language::English, "pw_correct") => "CORRECT PASSWORD! The object was unlocked.",
        (Language::Portuguese, "pw_wrong") => "SENHA INCORRETA. Tente novamente.",
        (Language::English, "pw_wrong") => "WRONG PASSWORD. Try again.",

        // ── Room dialog ──
        (Language::Portuguese, "msg_vault_locked") => {
            "Um cofre trancado. Parece precisar de uma senha de 3 dígitos."
        }
        (Language::English, "msg_vault_locked") => "A locked safe. It seems to need a 3-digit code.",
        (Language::Portuguese, "msg_vault_opened") => "O cofre se abriu! Você encontrou um Pincel.",
        (Language::English, "msg_vault_opened") => "The safe opened! You found a Paintbrush.",
        (Language::Portuguese, "msg_small_box") => "Nossa.. tantas memórias da Clara por aqui..",
        (Language::English, "msg_small_box") => "Wow.. so many memories of Clara in here..",
        (Language::Portuguese, "msg_large_box") => "Nossa.. tantas memórias da Helena por aqui..",
        (Language::English, "msg_large_box") => "Wow.. so many memories of Helena in here..",
        (Language::Portuguese, "msg_drag_pieces") => "Arraste as peças para formar a imagem.",
        (Language::English, "msg_drag_pieces") => "Drag the pieces to form the picture.",
        (Language::Portuguese, "msg_photo") => "Uma foto antiga. Clara e Helena sorrindo na praia.",
        (Language::English, "msg_photo") => "An old photo. Clara and Helena smiling at the beach.",
        (Language::Portuguese, "msg_letter") => "Uma carta sem remetente. A letra parece da Helena.",
        (Language::English, "msg_letter") => "A letter with no sender. It looks like Helena's handwriting.",

        // ── HUD ──
        (Language::Portuguese, "hud_inventory") => "Itens:",
        (Language::English, "hud_inventory") => "Items:",
        (Language::Portuguese, "item_pincel") => "Pincel",
        (Language::English, "item_pincel") => "Paintbrush",

        // ── Title bar location ──
        (Language::Portuguese, "loc_room") => "sala",
        (Language::English, "loc_room") => "room",
        (Language::Portuguese, "loc_password") => "senha",
        (Language::English, "loc_password") => "keypad",
        (Language::Portuguese, "loc_image_puzzle") => "quebra-cabeça",
        (Language::English, "loc_image_puzzle") => "picture puzzle",

        // ── Fallback ──
        _ => "???",
    }
}
