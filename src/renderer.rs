use glam::Vec3;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::round::Round;
use crate::scene::{Game, Scene};

/// World units from the player to the left and right edges of the radar
const RADAR_RANGE: f32 = 60.0;

/// Terminal cells are about twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

const MENU_TEXT: (u8, u8, u8) = (255, 255, 255);
const MENU_ACCENT: (u8, u8, u8) = (120, 200, 255);

/// Borrowed state needed to draw one frame
pub struct RenderView<'a> {
    pub game: &'a Game,
    pub area: Rect,
    pub fps: u32,
}

/// Draws the menu, the crossfade and the top-down arena view
#[derive(Debug, Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game.scene() {
            Scene::Menu => self.render_menu(frame, view, 1.0),
            Scene::Transitioning { fade_level } => {
                self.render_menu(frame, view, fade_level.max(0.0))
            }
            Scene::Gameplay(round) => self.render_gameplay(frame, view, round),
        }
    }

    /// Title, high score and the play prompt, every color scaled by `fade`
    fn render_menu(&self, frame: &mut Frame, view: &RenderView, fade: f32) {
        let text = Style::default().fg(fade_color(MENU_TEXT, fade));
        let accent = Style::default()
            .fg(fade_color(MENU_ACCENT, fade))
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("P A R A D O X   K I C K", accent)),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled("┌────────────┐", text)),
            Line::from(Span::styled("│    PLAY    │", text.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("└────────────┘", text)),
            Line::from(Span::styled("Enter, space or click to start", text)),
            Line::from(""),
            Line::from(Span::styled(
                format!("High score : {}", view.game.high_score()),
                text,
            )),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Use WASD to move, the mouse (or IJKL) to look, and space to shoot!",
                text,
            )),
            Line::from(Span::styled("Q to quit", text)),
        ];

        let height = lines.len() as u16;
        let menu_area = Rect {
            x: view.area.x,
            y: view.area.y + view.area.height.saturating_sub(height) / 2,
            width: view.area.width,
            height: height.min(view.area.height),
        };
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            menu_area,
        );
    }

    fn render_gameplay(&self, frame: &mut Frame, view: &RenderView, round: &Round) {
        let area = view.area;
        let config = view.game.config();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Arena ");
        // Score and stats rows on top, controls on the bottom row
        let arena = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: area.height.saturating_sub(3),
        };
        let radar = block.inner(arena);
        frame.render_widget(block, arena);

        let player = &round.player;
        let buffer = frame.buffer_mut();

        for bullet in round.bullets.iter() {
            if let Some((x, y)) = radar_cell(bullet.position - player.position, player.yaw, radar) {
                buffer.set_string(x, y, "*", Style::default().fg(Color::Yellow));
            }
        }

        for enemy in round.enemies.iter() {
            if let Some((x, y)) = radar_cell(enemy.position - player.position, player.yaw, radar) {
                let glyph = match enemy.position.y.round() as i32 {
                    i32::MIN..=1 => "o",
                    2 => "O",
                    _ => "@",
                };
                buffer.set_string(
                    x,
                    y,
                    glyph,
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        if let Some((x, y)) = radar_cell(Vec3::ZERO, player.yaw, radar) {
            buffer.set_string(
                x,
                y,
                "^",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            );
        }

        let header = Line::from(vec![Span::styled(
            format!("Score : {}", view.game.score()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(
            Paragraph::new(header).centered(),
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: 1,
            },
        );

        let stats = Line::from(vec![
            Span::styled("High: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.game.high_score()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", round.enemies.len()),
                Style::default().fg(Color::LightGreen),
            ),
            Span::styled("  Bullets: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", round.bullets.len(), config.bullet_cap),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  Pitch: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:+.0}°", -player.pitch.to_degrees()),
                Style::default().fg(Color::White),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", view.fps), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(
            Paragraph::new(stats),
            Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Mouse/IJKL: Look] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(
            Paragraph::new(controls).centered(),
            Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            },
        );
    }
}

/// Scales an RGB color toward black by `level` in `[0, 1]`
pub fn fade_color((r, g, b): (u8, u8, u8), level: f32) -> Color {
    let level = level.clamp(0.0, 1.0);
    let scale = |channel: u8| (f32::from(channel) * level).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Cell in `area` for a point at `relative` to the player, with the player's
/// heading pointing up. `None` when the point falls outside the area.
pub fn radar_cell(relative: Vec3, yaw: f32, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let ahead = relative.x * yaw.sin() + relative.z * yaw.cos();
    let right = relative.x * yaw.cos() - relative.z * yaw.sin();

    let units_per_col = RADAR_RANGE / (f32::from(area.width) / 2.0);
    let units_per_row = units_per_col * CELL_ASPECT;
    let center_x = f32::from(area.x) + f32::from(area.width) / 2.0;
    let center_y = f32::from(area.y) + f32::from(area.height) / 2.0;

    let x = (center_x + right / units_per_col).floor();
    let y = (center_y - ahead / units_per_row).floor();

    let inside_x = x >= f32::from(area.x) && x < f32::from(area.x + area.width);
    let inside_y = y >= f32::from(area.y) && y < f32::from(area.y + area.height);
    (inside_x && inside_y).then_some((x as u16, y as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::config::GameConfig;
    use crate::input::InputSnapshot;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    #[test]
    fn test_player_sits_at_center() {
        assert_eq!(radar_cell(Vec3::ZERO, 0.3, AREA), Some((60, 20)));
    }

    #[test]
    fn test_ahead_is_up_regardless_of_yaw() {
        let yaw = std::f32::consts::FRAC_PI_2;
        // Facing +x, so a point on +x is straight ahead
        let (x, y) = radar_cell(Vec3::new(20.0, 0.0, 0.0), yaw, AREA).unwrap();
        assert_eq!(x, 60);
        assert!(y < 20);
    }

    #[test]
    fn test_right_is_right() {
        let (x, y) = radar_cell(Vec3::new(20.0, 0.0, 0.0), 0.0, AREA).unwrap();
        assert!(x > 60);
        assert_eq!(y, 20);
    }

    #[test]
    fn test_far_points_are_clipped() {
        assert_eq!(radar_cell(Vec3::new(500.0, 0.0, 0.0), 0.0, AREA), None);
        assert_eq!(radar_cell(Vec3::ZERO, 0.0, Rect::default()), None);
    }

    #[test]
    fn test_fade_scales_toward_black() {
        assert_eq!(fade_color((200, 100, 0), 1.0), Color::Rgb(200, 100, 0));
        assert_eq!(fade_color((200, 100, 0), 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(fade_color((200, 100, 0), -1.0), Color::Rgb(0, 0, 0));
    }

    fn draw(game: &Game) -> String {
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game,
                    area: frame.area(),
                    fps: 60,
                };
                renderer.render(frame, &view);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_shows_high_score_and_play() {
        let game = Game::with_seed(GameConfig::default(), 1);
        let screen = draw(&game);
        assert!(screen.contains("PLAY"));
        assert!(screen.contains("High score : 0"));
        assert!(screen.contains("Enter, space or click to start"));
    }

    #[test]
    fn test_gameplay_shows_score_hud() {
        let mut game = Game::with_seed(GameConfig::default(), 1);
        game.press_play();
        while game.round().is_none() {
            game.step(&InputSnapshot::default());
        }
        let screen = draw(&game);
        assert!(screen.contains("Score : 0"));
        assert!(screen.contains("^"));
    }
}
