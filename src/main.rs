use macroquad::prelude::*;

use motorsim::simulation::controller::{Controls, Driver, RandomDriver};
use motorsim::simulation::mask::{Mask, MaskBuffer};
use motorsim::simulation::params::{Params, TrackConfig};
use motorsim::simulation::vehicle::Vehicle;

mod graphics;

const AI_COUNT: usize = 3;

/// Converts a decoded RGBA image into the simulation's RGB mask raster.
fn mask_from_image(image: &Image) -> Option<MaskBuffer> {
    let (w, h) = (image.width as i32, image.height as i32);
    let rgb: Vec<u8> = image
        .bytes
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    MaskBuffer::from_rgb_bytes(w, h, rgb)
}

fn keyboard_controls() -> Controls {
    let mut throttle = 0.0;
    if is_key_down(KeyCode::W) {
        throttle = 1.0;
    } else if is_key_down(KeyCode::S) {
        throttle = -1.0;
    }

    let mut steering = 0.0;
    if is_key_down(KeyCode::A) {
        steering = -1.0;
    } else if is_key_down(KeyCode::D) {
        steering = 1.0;
    }

    let drift = is_key_down(KeyCode::Space)
        || is_key_down(KeyCode::LeftShift)
        || is_key_down(KeyCode::RightShift);

    Controls {
        throttle,
        steering,
        drift,
    }
}

#[macroquad::main("Motorsim")]
async fn main() {
    let params = Params::default();

    let track = TrackConfig::load_from_file("assets/track.json").unwrap_or(TrackConfig {
        name: "map-2".to_string(),
        mask_file: "assets/mask.png".to_string(),
        spawn_x: 1375.0,
        spawn_y: 1220.0,
        spawn_angle: 0.0,
    });

    // A missing or unreadable mask is a fatal configuration error; the
    // simulation never starts without one.
    let mask_image = match load_image(&track.mask_file).await {
        Ok(image) => image,
        Err(err) => {
            eprintln!("failed to load mask {}: {err}", track.mask_file);
            return;
        }
    };
    let Some(mask) = mask_from_image(&mask_image) else {
        eprintln!("mask {} has invalid dimensions", track.mask_file);
        return;
    };

    let track_texture = Texture2D::from_image(&mask_image);

    let mut player = Vehicle::new(track.spawn_x, track.spawn_y, track.spawn_angle, &params);
    player.invincible = true;

    let mut ai_vehicles: Vec<Vehicle> = (0..AI_COUNT)
        .map(|_| Vehicle::new(track.spawn_x, track.spawn_y, track.spawn_angle, &params))
        .collect();
    let mut drivers: Vec<RandomDriver> = (0..AI_COUNT).map(|_| RandomDriver::new()).collect();

    let mut genesis = true;

    println!("Starting motorsim on track {}", track.name);

    loop {
        if genesis {
            clear_background(LIGHTGRAY);
            let text = "Press Enter to start driving (WASD + Shift to drift)";
            let font_size = 30.0;

            let text_size = measure_text(text, None, font_size as _, 1.0);
            draw_text(
                text,
                screen_width() / 2. - text_size.width / 2.,
                screen_height() / 2. - text_size.height / 2.,
                font_size,
                DARKGRAY,
            );

            if is_key_down(KeyCode::Enter) {
                genesis = false;
            }
            next_frame().await;
            continue;
        }

        if is_key_pressed(KeyCode::R) {
            player.reset();
            for vehicle in &mut ai_vehicles {
                vehicle.reset();
            }
        }

        player.apply_controls(keyboard_controls());
        player.update(&mask);

        for (vehicle, driver) in ai_vehicles.iter_mut().zip(&mut drivers) {
            if !vehicle.alive {
                continue;
            }
            let controls = driver.drive(&vehicle.radar_data());
            vehicle.apply_controls(controls);
            vehicle.update(&mask);
        }

        clear_background(DARKGRAY);

        let camera = graphics::Camera::follow(
            player.x,
            player.y,
            mask.width() as f32,
            mask.height() as f32,
        );
        draw_texture(&track_texture, -camera.x, -camera.y, WHITE);

        for vehicle in &ai_vehicles {
            graphics::draw_vehicle(vehicle, &camera, SKYBLUE);
        }
        graphics::draw_vehicle(&player, &camera, PINK);
        graphics::draw_radar(&player, &camera);
        graphics::draw_hud(&player, params.race.target_laps);

        next_frame().await
    }
}
