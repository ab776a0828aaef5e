//! Game logic: rooms, hotspots, dialog box and the two puzzles
//!
//! Screen states:
//!   Room     : background, hotspots, navigation arrows (standard rooms only)
//!   Custom   : a map outside the room cycle (e.g. `caixaclara`), no arrows
//!   Password : keypad overlay; room zones are torn down while it is open
//!   Image    : drag & drop pieces; room zones are torn down while it is open
//!
//! Both puzzles return to the room that was current when they started.

pub mod arrows;
pub mod behavior;
pub mod cursor;
pub mod i18n;
pub mod image_puzzle;
pub mod inventory;
pub mod password;
pub mod rooms;
pub mod scheduler;
pub mod text_box;
pub mod tooltip;
pub mod zones;

use minifb::Key;

use memorias_common::GameConfig;

use crate::assets::AssetStore;
use crate::engine::{Sprite, FRAME_MS};
use crate::game::arrows::{ArrowSide, NavArrows};
use crate::game::behavior::{Command, NavTarget, PasswordConfig, ZoneBehavior};
use crate::game::cursor::{CursorType, GameCursor};
use crate::game::i18n::{t, Language};
use crate::game::image_puzzle::{DropResult, ImagePuzzle};
use crate::game::inventory::Inventory;
use crate::game::password::{KeypadKey, PasswordOutcome, PasswordPuzzle, PuzzleCallback};
use crate::game::rooms::{LoadedMap, RoomError, RoomManager};
use crate::game::scheduler::{Scheduler, TaskId, TaskScope};
use crate::game::text_box::{TextBox, TextSize};
use crate::game::tooltip::Tooltip;
use crate::game::zones::HoverChange;

/// Work deferred through the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelayedAction {
    LoadRoom(u8),
    StartPasswordPuzzle(PasswordConfig),
}

/// What owns the screen on top of the background
#[derive(Debug)]
pub enum Overlay {
    None,
    Password(PasswordPuzzle),
    Image(ImagePuzzle),
}

/// Central game state
pub struct GameState {
    pub assets: AssetStore,
    pub rooms: RoomManager,
    background: Sprite,
    arrows: NavArrows,
    tooltip: Tooltip,
    pub text_box: TextBox,
    overlay: Overlay,
    scheduler: Scheduler<DelayedAction>,
    /// Pending delayed puzzle start, if any
    pending_puzzle: Option<TaskId>,
    pub inventory: Inventory,
    pub language: Language,
    pub cursor: GameCursor,
    pub mouse_x: i32,
    pub mouse_y: i32,
    mouse_down: bool,
    /// The press that opened the image puzzle is still being reported
    swallow_press: bool,
}

impl GameState {
    /// The first room is loaded after `setup_delay_ms`
    pub fn new(assets: AssetStore, config: &GameConfig) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            config.setup_delay_ms,
            TaskScope::Session,
            DelayedAction::LoadRoom(config.start_room),
        );
        let arrows = NavArrows::new(&assets);
        let background = blank_background();

        tracing::info!(
            "GameState initialized: {} maps, {} images, start room {}",
            assets.total_maps(),
            assets.total_images(),
            config.start_room
        );

        Self {
            assets,
            rooms: RoomManager::new(),
            background,
            arrows,
            tooltip: Tooltip::default(),
            text_box: TextBox::new(),
            overlay: Overlay::None,
            scheduler,
            pending_puzzle: None,
            inventory: Inventory::new(),
            language: config.language,
            cursor: GameCursor::new(),
            mouse_x: 0,
            mouse_y: 0,
            mouse_down: false,
            swallow_press: false,
        }
    }

    #[cfg(test)]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[cfg(test)]
    pub fn arrows_visible(&self) -> bool {
        self.arrows.is_visible()
    }

    #[cfg(test)]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    #[cfg(test)]
    pub fn puzzle_pending(&self) -> bool {
        self.pending_puzzle
            .map(|id| self.scheduler.is_pending(id))
            .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Room transitions
    // -----------------------------------------------------------------------

    /// Load standard room `n`. On error nothing changes.
    pub fn load_room(&mut self, n: u8) -> Result<(), RoomError> {
        let loaded = self.rooms.load_room(n, &self.assets)?;
        self.enter_map(loaded);
        Ok(())
    }

    pub fn next_room(&mut self) -> Result<(), RoomError> {
        let loaded = self.rooms.next_room(&self.assets)?;
        self.enter_map(loaded);
        Ok(())
    }

    pub fn prev_room(&mut self) -> Result<(), RoomError> {
        let loaded = self.rooms.prev_room(&self.assets)?;
        self.enter_map(loaded);
        Ok(())
    }

    pub fn load_custom_map(&mut self, map_key: &str, background: Option<&str>) -> Result<(), RoomError> {
        let loaded = self.rooms.load_custom_map(map_key, background, &self.assets)?;
        self.enter_map(loaded);
        Ok(())
    }

    fn navigate(&mut self, target: &NavTarget) {
        let result = match target {
            NavTarget::Room(n) => self.load_room(*n),
            NavTarget::CustomMap { map, background } => self.load_custom_map(map, Some(*background)),
        };
        if let Err(e) = result {
            tracing::warn!("Navigation to {:?} failed: {}", target, e);
        }
    }

    /// Common tail of every map load: the previous room's pending work and
    /// hover state go away, the background swaps, arrows follow the map kind.
    fn enter_map(&mut self, loaded: LoadedMap) {
        self.cancel_room_tasks();
        self.tooltip.hide();
        if let Some(bg) = &loaded.background {
            self.background = Sprite::from_bitmap(bg, &self.assets.background(bg), 0, 0, 0);
        }
        self.refresh_arrows();
        if self.rooms.zones().is_empty() {
            tracing::warn!("Map '{}' has no hotspots", loaded.map_key);
        }
        tracing::debug!("Entered '{}' ({} zones)", loaded.map_key, loaded.zone_count);
    }

    fn refresh_arrows(&mut self) {
        let standard = self.rooms.is_standard();
        self.arrows.set_visible(standard);
    }

    fn cancel_room_tasks(&mut self) {
        let dropped = self.scheduler.cancel_scope(TaskScope::Room);
        if dropped > 0 {
            tracing::debug!("Cancelled {} pending room task(s)", dropped);
        }
        self.pending_puzzle = None;
    }

    // -----------------------------------------------------------------------
    // Hotspot dispatch
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, behavior: ZoneBehavior) {
        match behavior {
            ZoneBehavior::ShowDialog { text } => self.text_box.show(text),
            ZoneBehavior::ShowChoice { text, open } => {
                self.text_box.show_with_choices(
                    text,
                    vec![Command::Navigate(open)],
                    vec![Command::HideTextBox],
                );
            }
            ZoneBehavior::StartPasswordPuzzle(config) => {
                self.text_box.show(config.intro);
                self.schedule_password_puzzle(config);
            }
            ZoneBehavior::StartImagePuzzle => self.start_image_puzzle(),
            ZoneBehavior::NavigateTo(target) => self.navigate(&target),
            ZoneBehavior::Noop => {}
        }
    }

    /// Open the keypad after the configured delay. A newer request replaces
    /// a pending one.
    pub fn schedule_password_puzzle(&mut self, config: PasswordConfig) {
        if let Some(old) = self.pending_puzzle.take() {
            self.scheduler.cancel(old);
        }
        let delay = config.delay_ms;
        let id = self
            .scheduler
            .schedule(delay, TaskScope::Room, DelayedAction::StartPasswordPuzzle(config));
        self.pending_puzzle = Some(id);
        tracing::debug!("Password puzzle in {} ms", delay);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ShowMessage(key) => self.text_box.show(key),
            Command::HideTextBox => self.text_box.hide(),
            Command::Navigate(target) => self.navigate(&target),
            Command::AddItem(id) => {
                self.inventory.add_item(id);
            }
        }
    }

    fn apply_all(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    // -----------------------------------------------------------------------
    // Puzzles
    // -----------------------------------------------------------------------

    /// Puzzle takes over the screen: room zones and pending room work go away
    fn clear_room_for_puzzle(&mut self) {
        self.cancel_room_tasks();
        let dropped = self.rooms.clear_zones();
        tracing::debug!("Cleared {} zones for puzzle", dropped);
        self.tooltip.hide();
        self.arrows.set_visible(false);
    }

    /// Start the keypad with the commands of `config` as success callback
    pub fn start_password_puzzle(&mut self, config: PasswordConfig) {
        let on_success = config.on_success.clone();
        self.start_password_puzzle_with(
            config.password,
            Box::new(move || on_success.clone()),
            Box::new(|| {
                tracing::debug!("Wrong password entered");
                Vec::new()
            }),
        );
    }

    pub fn start_password_puzzle_with(
        &mut self,
        password: &str,
        on_success: PuzzleCallback,
        on_failure: PuzzleCallback,
    ) {
        self.clear_room_for_puzzle();
        self.text_box.hide();
        self.overlay = Overlay::Password(PasswordPuzzle::start(password, on_success, on_failure));
    }

    pub fn press_keypad(&mut self, key: KeypadKey) {
        let Overlay::Password(puzzle) = &mut self.overlay else {
            return;
        };
        match puzzle.press(key) {
            PasswordOutcome::Typed | PasswordOutcome::Ignored => {}
            PasswordOutcome::MaxDigits => self.text_box.show("pw_max_digits"),
            PasswordOutcome::Cleared => self.text_box.show("pw_cleared"),
            PasswordOutcome::Correct(commands) => {
                self.text_box.show("pw_correct");
                self.apply_all(commands);
                self.end_password_puzzle();
            }
            PasswordOutcome::Wrong(commands) => {
                self.text_box.show("pw_wrong");
                self.apply_all(commands);
            }
        }
    }

    /// Tear the keypad down and go back to the room. No callback fires.
    pub fn end_password_puzzle(&mut self) {
        if !matches!(self.overlay, Overlay::Password(_)) {
            return;
        }
        self.overlay = Overlay::None;
        self.return_to_room();
    }

    pub fn start_image_puzzle(&mut self) {
        self.clear_room_for_puzzle();
        self.text_box.set_size(TextSize::Large);
        self.text_box.show("msg_drag_pieces");
        self.overlay = Overlay::Image(ImagePuzzle::new(&self.assets));
        self.swallow_press = true;
    }

    pub fn exit_image_puzzle(&mut self) {
        if !matches!(self.overlay, Overlay::Image(_)) {
            return;
        }
        self.overlay = Overlay::None;
        self.text_box.hide();
        self.text_box.set_size(TextSize::Normal);
        self.cursor.reset();
        self.return_to_room();
    }

    fn return_to_room(&mut self) {
        let room = self.rooms.current();
        if let Err(e) = self.load_room(room) {
            tracing::warn!("Could not return to room {}: {}", room, e);
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn on_click(&mut self, x: i32, y: i32) {
        let lang = self.language;
        let exit_hit = text_box::exit_button().hit(lang, x, y);
        match self.overlay {
            Overlay::Password(_) => {
                if exit_hit {
                    tracing::debug!("Password puzzle exited");
                    self.end_password_puzzle();
                } else if let Some(key) = password::key_at(x, y) {
                    self.press_keypad(key);
                }
                return;
            }
            Overlay::Image(_) => {
                if exit_hit {
                    self.exit_image_puzzle();
                }
                return;
            }
            Overlay::None => {}
        }

        if let Some(commands) = self.text_box.on_click(lang, x, y) {
            self.apply_all(commands);
            return;
        }

        if let Some(side) = self.arrows.hit(x, y) {
            let result = match side {
                ArrowSide::Left => self.prev_room(),
                ArrowSide::Right => self.next_room(),
            };
            if let Err(e) = result {
                tracing::warn!("Room change failed: {}", e);
            }
            return;
        }

        let zones = self.rooms.zones();
        let Some(zone) = zones.zone_at(x, y).and_then(|id| zones.get(id)) else {
            return;
        };
        tracing::debug!("Clicked '{}'", zone.name);
        let behavior = zone.behavior.clone();
        let opens_puzzle = behavior.opens_puzzle();
        self.dispatch(behavior);
        if !opens_puzzle && matches!(self.overlay, Overlay::None) {
            self.refresh_arrows();
        }
    }

    /// Update mouse state each frame (call after on_click)
    pub fn on_mouse_state(&mut self, x: i32, y: i32, down: bool) {
        let opening_press = std::mem::take(&mut self.swallow_press);
        let pressed = down && !self.mouse_down && !opening_press;
        self.mouse_x = x;
        self.mouse_y = y;
        self.mouse_down = down;

        if let Overlay::Image(puzzle) = &mut self.overlay {
            if pressed {
                if puzzle.on_mouse_down(x, y) {
                    self.cursor.set(CursorType::Grab);
                }
            } else if down {
                puzzle.on_mouse_move(x, y);
            } else if puzzle.is_dragging() {
                if let DropResult::Dropped { number, x: px, y: py } = puzzle.on_mouse_up() {
                    tracing::debug!("Piece {} dropped at ({}, {})", number, px, py);
                }
                self.cursor.remove(CursorType::Grab);
            }
        }

        if matches!(self.overlay, Overlay::None) {
            let zones = self.rooms.zones_mut();
            match zones.update_hover(x, y) {
                HoverChange::Entered(id) => {
                    if let Some(zone) = zones.get(id) {
                        self.tooltip.show_for(&zone.name, zone.rect);
                    }
                }
                HoverChange::Left => self.tooltip.hide(),
                HoverChange::Unchanged => {}
            }
        }

        self.update_cursor(x, y);
    }

    /// Hand over anything clickable. A drag keeps its Grab entry on top.
    fn update_cursor(&mut self, x: i32, y: i32) {
        let lang = self.language;
        let clickable = match &self.overlay {
            Overlay::Image(puzzle) if puzzle.is_dragging() => false,
            Overlay::Image(puzzle) => {
                puzzle.piece_at(x, y).is_some() || text_box::exit_button().hit(lang, x, y)
            }
            Overlay::Password(_) => {
                password::key_at(x, y).is_some() || text_box::exit_button().hit(lang, x, y)
            }
            Overlay::None => {
                let zones = self.rooms.zones();
                let over_zone = zones
                    .hovered()
                    .and_then(|id| zones.get(id))
                    .map(|z| z.behavior.is_interactive())
                    .unwrap_or(false);
                over_zone || self.arrows.hit(x, y).is_some() || self.text_box.button_at(lang, x, y)
            }
        };
        self.cursor.remove(CursorType::Click);
        if clickable {
            self.cursor.set(CursorType::Click);
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        if matches!(self.overlay, Overlay::Password(_)) {
            match key {
                Key::Enter | Key::NumPadEnter => self.press_keypad(KeypadKey::Ok),
                Key::Backspace | Key::Delete => self.press_keypad(KeypadKey::Clear),
                _ => {}
            }
            return;
        }

        // Arrow keys mirror the on-screen arrows
        if !self.arrows.is_visible() {
            return;
        }
        let result = match key {
            Key::Left => self.prev_room(),
            Key::Right => self.next_room(),
            _ => return,
        };
        if let Err(e) = result {
            tracing::warn!("Room change failed: {}", e);
        }
    }

    pub fn on_char_input(&mut self, ch: char) {
        if ch.is_ascii_digit() {
            self.press_keypad(KeypadKey::Digit(ch));
        }
    }

    /// One frame of game time
    pub fn update(&mut self) {
        if self.scheduler.is_empty() {
            return;
        }
        for action in self.scheduler.tick(FRAME_MS) {
            match action {
                DelayedAction::LoadRoom(n) => {
                    if let Err(e) = self.load_room(n) {
                        tracing::warn!("Initial room {} failed: {}, falling back to 1", n, e);
                        if let Err(e) = self.load_room(1) {
                            tracing::error!("No playable room: {}", e);
                        }
                    }
                }
                DelayedAction::StartPasswordPuzzle(config) => {
                    self.pending_puzzle = None;
                    self.start_password_puzzle(config);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn get_all_sprites(&self) -> Vec<Sprite> {
        let mut sprites = vec![self.background.clone()];
        sprites.extend(self.arrows.sprites().into_iter().cloned());
        if let Overlay::Image(puzzle) = &self.overlay {
            sprites.extend(puzzle.sprites());
        }
        sprites.sort_by_key(|s| s.z_order);
        sprites
    }

    pub fn draw_ui(&self, fb: &mut [u32]) {
        let lang = self.language;
        self.text_box.draw(fb, lang);
        match &self.overlay {
            Overlay::Password(puzzle) => {
                password::draw(fb, puzzle, lang);
                text_box::exit_button().draw(fb, lang);
            }
            Overlay::Image(_) => text_box::exit_button().draw(fb, lang),
            Overlay::None => self.tooltip.draw(fb),
        }
        self.inventory.draw(fb, lang);
    }

    /// What's under the cursor (for the title bar)
    pub fn get_hover_info(&self, x: i32, y: i32) -> String {
        match &self.overlay {
            Overlay::Image(puzzle) => puzzle
                .piece_at(x, y)
                .map(|i| puzzle.pieces()[i].as_sprite().name.clone())
                .unwrap_or_default(),
            Overlay::Password(puzzle) => puzzle.display(),
            Overlay::None => {
                let zones = self.rooms.zones();
                zones
                    .zone_at(x, y)
                    .and_then(|id| zones.get(id))
                    .map(|z| z.name.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Short description of where the player is
    pub fn location_label(&self) -> String {
        let lang = self.language;
        match (&self.overlay, self.rooms.current_map()) {
            (Overlay::Password(_), _) => t(lang, "loc_password").to_string(),
            (Overlay::Image(_), _) => t(lang, "loc_image_puzzle").to_string(),
            (Overlay::None, Some(map)) if self.rooms.is_standard() => format!(
                "{} {}/{} ({})",
                t(lang, "loc_room"),
                self.rooms.current(),
                self.rooms.total(),
                map
            ),
            (Overlay::None, Some(map)) => map.to_string(),
            (Overlay::None, None) => "...".to_string(),
        }
    }
}

fn blank_background() -> Sprite {
    use crate::engine::{SCREEN_HEIGHT, SCREEN_WIDTH};
    let bmp = crate::assets::bitmap::DecodedBitmap {
        width: SCREEN_WIDTH as u32,
        height: SCREEN_HEIGHT as u32,
        pixels: [0, 0, 0, 255].repeat(SCREEN_WIDTH * SCREEN_HEIGHT),
    };
    Sprite::from_bitmap("blank", &bmp, 0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Rect;
    use crate::game::password::keypad_layout;
    use std::cell::Cell;
    use std::rc::Rc;

    fn game() -> GameState {
        GameState::new(AssetStore::bundled(), &GameConfig::default())
    }

    /// Game with room 1 loaded
    fn started() -> GameState {
        let mut g = game();
        for _ in 0..4 {
            g.update();
        }
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        g
    }

    fn zone_rect(g: &GameState, name: &str) -> Rect {
        g.rooms
            .zones()
            .iter()
            .find(|z| z.name == name)
            .map(|z| z.rect)
            .unwrap_or_else(|| panic!("no zone '{}'", name))
    }

    fn click_zone(g: &mut GameState, name: &str) {
        let r = zone_rect(g, name);
        g.on_click(r.x + 2, r.y + 2);
    }

    fn click_rect(g: &mut GameState, r: Rect) {
        g.on_click(r.x + r.width as i32 / 2, r.y + r.height as i32 / 2);
    }

    fn click_key(g: &mut GameState, key: KeypadKey) {
        let b = keypad_layout().into_iter().find(|b| b.key == key).unwrap();
        g.on_click(b.cx, b.cy);
    }

    fn advance(g: &mut GameState, ms: u32) {
        for _ in 0..ms.div_ceil(FRAME_MS) {
            g.update();
        }
    }

    #[test]
    fn first_room_loads_after_setup_delay() {
        let mut g = game();
        assert!(g.rooms.current_map().is_none());
        assert!(!g.arrows_visible());
        g.update();
        g.update();
        g.update();
        assert!(g.rooms.current_map().is_none());
        g.update();
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        assert!(g.arrows_visible());
    }

    #[test]
    fn arrows_cycle_rooms() {
        let mut g = started();
        g.on_click(406, 120);
        assert_eq!(g.rooms.current(), 2);
        g.on_click(20, 120);
        g.on_click(20, 120);
        assert_eq!(g.rooms.current(), 4);
        g.on_key_down(Key::Right);
        assert_eq!(g.rooms.current(), 1);
    }

    #[test]
    fn only_current_room_zones_are_clickable() {
        let mut g = started();
        let old = zone_rect(&g, "cofre_trancado");
        g.next_room().unwrap();
        assert!(g.rooms.zones().iter().all(|z| z.name != "cofre_trancado"));
        g.on_click(old.x + 2, old.y + 2);
        assert!(g.text_box.message() != Some("msg_vault_locked"));
    }

    #[test]
    fn hover_shows_and_hides_tooltip() {
        let mut g = started();
        let r = zone_rect(&g, "cama");
        g.on_mouse_state(r.x + 1, r.y + 1, false);
        assert_eq!(g.tooltip().text(), Some("cama"));
        assert_eq!(g.cursor.current(), CursorType::Standard);
        let vault = zone_rect(&g, "cofre_trancado");
        g.on_mouse_state(vault.x + 1, vault.y + 1, false);
        assert_eq!(g.tooltip().text(), Some("cofre_trancado"));
        assert_eq!(g.cursor.current(), CursorType::Click);
        g.on_mouse_state(213, 5, false);
        assert!(g.tooltip().text().is_none());
    }

    #[test]
    fn vault_opens_keypad_after_delay() {
        let mut g = started();
        click_zone(&mut g, "cofre_trancado");
        assert_eq!(g.text_box.message(), Some("msg_vault_locked"));
        assert!(g.puzzle_pending());
        assert!(g.arrows_visible());
        advance(&mut g, 2970);
        assert!(matches!(g.overlay(), Overlay::None));
        advance(&mut g, 33);
        assert!(matches!(g.overlay(), Overlay::Password(_)));
        assert!(g.rooms.zones().is_empty());
        assert!(!g.arrows_visible());
        assert!(!g.text_box.is_visible());
    }

    #[test]
    fn leaving_room_cancels_pending_puzzle() {
        let mut g = started();
        click_zone(&mut g, "cofre_trancado");
        g.on_click(406, 120);
        assert!(!g.puzzle_pending());
        advance(&mut g, 5000);
        assert!(matches!(g.overlay(), Overlay::None));
        assert_eq!(g.rooms.current(), 2);
    }

    #[test]
    fn second_vault_click_replaces_pending_start() {
        let mut g = started();
        click_zone(&mut g, "cofre_trancado");
        advance(&mut g, 1500);
        click_zone(&mut g, "cofre_trancado");
        advance(&mut g, 1600);
        assert!(matches!(g.overlay(), Overlay::None));
        advance(&mut g, 1500);
        assert!(matches!(g.overlay(), Overlay::Password(_)));
    }

    #[test]
    fn vault_code_awards_brush_and_returns() {
        let mut g = started();
        g.next_room().unwrap();
        g.prev_room().unwrap();
        click_zone(&mut g, "cofre_trancado");
        advance(&mut g, 3000);
        for d in ['1', '2', '4'] {
            click_key(&mut g, KeypadKey::Digit(d));
        }
        click_key(&mut g, KeypadKey::Ok);
        assert!(matches!(g.overlay(), Overlay::None));
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        assert!(g.inventory.contains("pincel"));
        assert_eq!(g.text_box.message(), Some("msg_vault_opened"));
        assert!(g.arrows_visible());
    }

    #[test]
    fn success_callback_runs_exactly_once() {
        let mut g = started();
        g.next_room().unwrap();
        let (ok, fail) = (Rc::new(Cell::new(0u32)), Rc::new(Cell::new(0u32)));
        let (o, f) = (Rc::clone(&ok), Rc::clone(&fail));
        g.start_password_puzzle_with(
            "124",
            Box::new(move || {
                o.set(o.get() + 1);
                Vec::new()
            }),
            Box::new(move || {
                f.set(f.get() + 1);
                Vec::new()
            }),
        );
        for d in "123".chars() {
            g.on_char_input(d);
        }
        g.on_key_down(Key::Enter);
        assert_eq!((ok.get(), fail.get()), (0, 1));
        assert_eq!(g.text_box.message(), Some("pw_wrong"));
        let Overlay::Password(p) = g.overlay() else { panic!("keypad closed") };
        assert_eq!(p.input(), "");

        for d in "124".chars() {
            g.on_char_input(d);
        }
        g.on_key_down(Key::Enter);
        g.on_key_down(Key::Enter);
        assert_eq!((ok.get(), fail.get()), (1, 1));
        assert_eq!(g.rooms.current_map(), Some("mapa2"));
    }

    #[test]
    fn keypad_feedback_messages() {
        let mut g = started();
        g.start_password_puzzle_with("124", Box::new(Vec::new), Box::new(Vec::new));
        for d in "1249".chars() {
            g.on_char_input(d);
        }
        assert_eq!(g.text_box.message(), Some("pw_max_digits"));
        let Overlay::Password(p) = g.overlay() else { panic!("keypad closed") };
        assert_eq!(p.input(), "124");
        click_key(&mut g, KeypadKey::Clear);
        assert_eq!(g.text_box.message(), Some("pw_cleared"));
        g.on_char_input('7');
        g.on_key_down(Key::Backspace);
        let Overlay::Password(p) = g.overlay() else { panic!("keypad closed") };
        assert_eq!(p.display(), "___");
    }

    #[test]
    fn keypad_exit_fires_no_callback() {
        let mut g = started();
        let calls = Rc::new(Cell::new(0u32));
        let (a, b) = (Rc::clone(&calls), Rc::clone(&calls));
        g.start_password_puzzle_with(
            "124",
            Box::new(move || {
                a.set(a.get() + 1);
                Vec::new()
            }),
            Box::new(move || {
                b.set(b.get() + 1);
                Vec::new()
            }),
        );
        g.on_char_input('1');
        let exit = text_box::exit_button().rect(g.language);
        click_rect(&mut g, exit);
        assert!(matches!(g.overlay(), Overlay::None));
        assert_eq!(calls.get(), 0);
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        assert!(!g.rooms.zones().is_empty());
    }

    #[test]
    fn image_puzzle_round_trip() {
        let mut g = started();
        g.next_room().unwrap();
        click_zone(&mut g, "quadro_puzzle");
        g.on_mouse_state(0, 0, false);
        assert!(matches!(g.overlay(), Overlay::Image(_)));
        assert!(g.rooms.zones().is_empty());
        assert!(!g.arrows_visible());
        assert_eq!(g.text_box.message(), Some("msg_drag_pieces"));
        assert_eq!(g.text_box.size(), TextSize::Large);
        assert!(!g.text_box.has_choices());

        // drag piece 1 somewhere else
        g.on_mouse_state(113, 70, true);
        g.on_mouse_state(300, 150, true);
        assert_eq!(g.cursor.current(), CursorType::Grab);
        g.on_mouse_state(300, 150, false);
        let Overlay::Image(p) = g.overlay() else { panic!("puzzle closed") };
        assert_eq!((p.pieces()[0].x, p.pieces()[0].y), (300, 150));
        assert_eq!(g.get_hover_info(173, 70), image_puzzle::piece_image_key(2));

        let exit = text_box::exit_button().rect(g.language);
        click_rect(&mut g, exit);
        assert!(matches!(g.overlay(), Overlay::None));
        assert!(!g.text_box.is_visible());
        assert_eq!(g.text_box.size(), TextSize::Normal);
        assert_eq!(g.rooms.current_map(), Some("mapa2"));
        assert!(g.arrows_visible());
    }

    #[test]
    fn opening_click_does_not_grab_a_piece() {
        let mut g = started();
        g.next_room().unwrap();
        // inside quadro_puzzle and on top of piece 3's slot
        g.on_click(220, 60);
        g.on_mouse_state(220, 60, true);
        let Overlay::Image(p) = g.overlay() else { panic!("puzzle not open") };
        assert!(!p.is_dragging());
        assert_ne!(g.cursor.current(), CursorType::Grab);

        g.on_mouse_state(380, 200, true);
        g.on_mouse_state(380, 200, false);
        let Overlay::Image(p) = g.overlay() else { panic!("puzzle closed") };
        assert_eq!((p.pieces()[2].x, p.pieces()[2].y), (233, 70));

        // the next press picks the piece up as usual
        g.on_mouse_state(233, 70, true);
        let Overlay::Image(p) = g.overlay() else { panic!("puzzle closed") };
        assert!(p.is_dragging());
        assert_eq!(g.cursor.current(), CursorType::Grab);
        g.on_mouse_state(233, 70, false);
        assert_eq!(g.cursor.current(), CursorType::Click);
    }

    #[test]
    fn location_label_follows_language() {
        let mut g = started();
        assert_eq!(g.location_label(), "sala 1/4 (mapa1)");
        g.language = Language::English;
        assert_eq!(g.location_label(), "room 1/4 (mapa1)");
        g.start_password_puzzle_with("124", Box::new(Vec::new), Box::new(Vec::new));
        assert_eq!(g.location_label(), "keypad");
        g.language = Language::Portuguese;
        assert_eq!(g.location_label(), "senha");
    }

    #[test]
    fn box_choice_opens_caixaclara_and_voltar_returns() {
        let mut g = started();
        click_zone(&mut g, "caixa pequena");
        assert_eq!(g.text_box.message(), Some("msg_small_box"));
        assert!(g.text_box.has_choices());
        let open = TextBox::open_button().rect(g.language);
        click_rect(&mut g, open);
        assert_eq!(g.rooms.current_map(), Some("caixaclara"));
        assert!(!g.text_box.is_visible());
        assert!(!g.arrows_visible());
        assert_eq!(g.rooms.current(), 1);

        click_zone(&mut g, "voltar");
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        assert!(g.arrows_visible());
    }

    #[test]
    fn close_choice_just_hides() {
        let mut g = started();
        click_zone(&mut g, "caixa pequena");
        let close = TextBox::close_button().rect(g.language);
        click_rect(&mut g, close);
        assert!(!g.text_box.is_visible());
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
    }

    #[test]
    fn bad_room_keeps_state() {
        let mut g = started();
        assert!(matches!(g.load_room(9), Err(RoomError::OutOfRange { .. })));
        assert_eq!(g.rooms.current_map(), Some("mapa1"));
        assert!(g.arrows_visible());
    }

    #[test]
    fn sprites_include_pieces_only_during_puzzle() {
        let mut g = started();
        assert_eq!(g.get_all_sprites().len(), 3);
        g.start_image_puzzle();
        assert_eq!(g.get_all_sprites().len(), 7);
    }
}
