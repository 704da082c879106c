use anyhow::Result;
use glam::Vec2;
use log::info;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::math::Rect;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Action, InputManager};
use crate::game::camera::FollowCamera;
use crate::game::player::PlayerConfig;
use crate::game::tilemap::TileMap;
use crate::game::world::GameWorld;

/// Demo level: a long floor with a small ledge under the spawn and a
/// taller platform further right
const LEVEL: &[&str] = &[
    "........................................",
    "........................................",
    "........................................",
    "..............####......................",
    "........................................",
    ".....###..............######............",
    "........................................",
    "########################################",
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Ronin...");

    let map = TileMap::from_rows(LEVEL)?;
    let mut world = GameWorld::new(
        map,
        PlayerConfig::default(),
        Vec2::new(5.0, 5.0),
        FollowCamera::new(3.0, 1280.0 / 720.0),
    )?;

    // Camera rooms covering each half of the level
    world.add_trigger_region(Rect::from_min_max(
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 8.0),
    ));
    world.add_trigger_region(Rect::from_min_max(
        Vec2::new(20.0, 0.0),
        Vec2::new(40.0, 8.0),
    ));

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ronin")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput {
                    event: key_event, ..
                },
                ..
            } => {
                input.process_keyboard_event(&key_event);

                // Pause and quit act at event time, outside the tick loop
                if key_event.state == ElementState::Pressed && !key_event.repeat {
                    if let PhysicalKey::Code(code) = key_event.physical_key {
                        match input.action_for(code) {
                            Some(Action::Pause) => game_loop.toggle_pause(),
                            Some(Action::Menu) => {
                                info!("Quit requested");
                                elwt.exit();
                            }
                            _ => {}
                        }
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Release held keys so nothing sticks while unfocused
                input.reset();
            }
            Event::AboutToWait => {
                let ticks = game_loop.begin_frame();
                for _ in 0..ticks {
                    world.tick(input.state(), game_loop.fixed_timestep());
                    input.update();
                }

                // Once a second, report where the character is
                if ticks > 0 && game_loop.tick_count() % 60 == 0 {
                    info!(
                        "t {:.0}s, fps {:.0}, states [{}], position ({:.2}, {:.2})",
                        game_loop.elapsed_secs(),
                        game_loop.fps(),
                        world.state_line(),
                        world.player().position.x,
                        world.player().position.y
                    );
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
