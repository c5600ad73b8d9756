use macroquad::prelude::*;
use motorsim::simulation::vehicle::Vehicle;

/// Camera offset in world pixels: world position minus this is screen position.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Centers the camera on a world position, clamped to the map.
    pub fn follow(target_x: f32, target_y: f32, map_w: f32, map_h: f32) -> Self {
        let x = (target_x - screen_width() / 2.0).clamp(0.0, (map_w - screen_width()).max(0.0));
        let y = (target_y - screen_height() / 2.0).clamp(0.0, (map_h - screen_height()).max(0.0));
        Self { x, y }
    }
}

pub fn draw_vehicle(vehicle: &Vehicle, camera: &Camera, color: Color) {
    if !vehicle.alive || !vehicle.is_visible() {
        return;
    }

    let sx = vehicle.x - camera.x;
    let sy = vehicle.y - camera.y;

    draw_rectangle_ex(
        sx,
        sy,
        vehicle.length,
        vehicle.width,
        DrawRectangleParams {
            offset: vec2(0.5, 0.5),
            rotation: vehicle.angle,
            color,
        },
    );

    // Heading marker
    let nose = vec2(
        sx + vehicle.angle.cos() * vehicle.length / 2.0,
        sy + vehicle.angle.sin() * vehicle.length / 2.0,
    );
    draw_line(sx, sy, nose.x, nose.y, 2.0, BLACK);
}

pub fn draw_radar(vehicle: &Vehicle, camera: &Camera) {
    if !vehicle.alive {
        return;
    }

    for ray in &vehicle.radar.rays {
        let color = if ray.distance > 50.0 { GREEN } else { RED };
        draw_line(
            vehicle.x - camera.x,
            vehicle.y - camera.y,
            ray.end.0 - camera.x,
            ray.end.1 - camera.y,
            2.0,
            color,
        );
        draw_circle(ray.end.0 - camera.x, ray.end.1 - camera.y, 4.0, color);
    }
}

pub fn draw_hud(player: &Vehicle, target_laps: u32) {
    let speed_text = format!("{} km/h", player.speed_kmh());
    draw_text(&speed_text, 20.0, 40.0, 32.0, WHITE);

    let lap_text = format!(
        "Lap {}/{}  CP {}/{}",
        player.lap_count(),
        target_laps,
        player.checkpoint_count(),
        player.checkpoint.state.total_checkpoints,
    );
    draw_text(&lap_text, 20.0, 75.0, 32.0, WHITE);

    if let Some(best) = player.checkpoint.state.best_lap_time {
        let best_text = format!("Best lap: {:.2}s", best as f32 / 60.0);
        draw_text(&best_text, 20.0, 110.0, 32.0, YELLOW);
    }
}
