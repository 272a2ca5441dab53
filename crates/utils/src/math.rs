use bevy::math::Vec2;


/// Horizontal side of `to` as seen from `from`: `1.0` right, `-1.0` left, `0.0` same column.
pub fn x_direction(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Offset applied to a ground spawn point when the camera zooms out by `zoom_offset`.
///
/// The point shifts toward the player's side by twice the zoom offset,
/// a point in the player's column does not move.
pub fn ground_reflow_offset(point: Vec2, player: Vec2, zoom_offset: f32) -> Vec2 {
    let direction = x_direction(point, player);
    Vec2::new(zoom_offset * direction * 2.0, 0.0)
}

/// Same as [`ground_reflow_offset`], sky points also climb by twice the zoom offset.
pub fn sky_reflow_offset(point: Vec2, player: Vec2, zoom_offset: f32) -> Vec2 {
    let ground = ground_reflow_offset(point, player, zoom_offset);
    Vec2::new(ground.x, zoom_offset * 2.0)
}
