use cgmath::{Vector2, Vector3, vec3};

use super::Frame;
use crate::{
    data_structures::transform::{Transform, UvScale},
    resources::mesh::{BoxSide, Faces, Primitive},
};

/// Width / height of the keyboard photo, used when the image is not loaded.
const KEYBOARD_TEXTURE_ASPECT: f32 = 3.63415;

pub(super) fn draw_desk(frame: &mut Frame<'_>) -> anyhow::Result<()> {
    frame.transform(Transform::placed([25.0, 1.0, 12.0], [0.0, 0.0, 0.0]));
    frame.texture("desk")?;
    frame.material("desk")?;
    frame.draw(Primitive::Plane)
}

/// The top face carries the key layout stretched to the keyboard's footprint;
/// the other five faces sample the photo unscaled.
pub(super) fn draw_keyboard(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    let (width, height, depth) = (11.0, 0.4, 4.5);

    frame.texture("keyboard_texture")?;
    frame.material("plastic")?;
    let texture_aspect = frame
        .texture_aspect("keyboard_texture")
        .unwrap_or(KEYBOARD_TEXTURE_ASPECT);
    frame.uv_scale(UvScale::fit(width / depth, texture_aspect));
    frame.transform(Transform::placed(
        [width, height, depth],
        [0.0, desk_height + height / 2.0, -0.5],
    ));
    frame.draw_faces(Primitive::Box, Faces::BoxSide(BoxSide::Top))?;

    frame.uv_scale(Vector2::new(1.0, 1.0));
    for side in [BoxSide::Back, BoxSide::Bottom, BoxSide::Left, BoxSide::Right, BoxSide::Front] {
        frame.draw_faces(Primitive::Box, Faces::BoxSide(side))?;
    }
    Ok(())
}

pub(super) fn draw_mouse(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    frame.texture("mouse_texture")?;
    frame.material("plastic")?;
    frame.transform(Transform::placed([1.25, 0.2, 2.0], [8.0, desk_height + 0.1, -1.0]));
    frame.draw(Primitive::Sphere)
}

pub(super) fn draw_teacup(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    let bottom = vec3(12.0, desk_height + 0.15 + 0.5, 1.0);

    frame.color(0.95, 0.9, 0.85, 1.0);
    frame.material("teacup")?;
    frame.transform(Transform::placed([1.5, 0.5, 1.5], bottom));
    frame.draw(Primitive::Sphere)?;

    // The sphere closes the bottom.
    frame.transform(Transform::placed([1.5, 1.0, 1.5], bottom + vec3(0.0, 0.5, 0.0)));
    frame.draw_faces(
        Primitive::Cylinder,
        Faces::Cylinder {
            top: true,
            bottom: false,
            sides: true,
        },
    )
}

pub(super) fn draw_saucer(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    let position = vec3(12.0, desk_height + 0.15, 1.0);

    frame.color(0.95, 0.9, 0.85, 1.0);
    frame.material("saucer")?;
    frame.transform(Transform::placed([3.0, 0.4, 3.0], position));
    frame.draw(Primitive::Sphere)?;

    frame.transform(Transform::placed([1.5, 0.2, 1.5], position));
    frame.draw(Primitive::Cylinder)
}

/// Flat-coloured box, used for bezels and stand parts.
fn draw_panel(
    frame: &mut Frame<'_>,
    color: f32,
    scale: Vector3<f32>,
    position: Vector3<f32>,
) -> anyhow::Result<()> {
    frame.color(color, color, color, 1.0);
    frame.transform(Transform::placed(scale, position));
    frame.draw(Primitive::Box)
}

pub(super) fn draw_monitor(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    let base = vec3(0.0, desk_height + 4.0, -1.0);
    let width = 18.0;
    let total_height = 12.0;
    let silver_height = 2.5;
    let bezel = 0.6;
    let strip = 0.5;

    frame.material("plastic")?;

    // Top bezel.
    draw_panel(
        frame,
        0.0,
        vec3(width, bezel, 0.2),
        base + vec3(0.0, total_height - bezel / 2.0, 0.0),
    )?;
    // Side bezels.
    for x in [-width / 2.0 + bezel / 2.0, width / 2.0 - bezel / 2.0] {
        draw_panel(
            frame,
            0.0,
            vec3(bezel, total_height, 0.2),
            base + vec3(x, total_height / 2.0, 0.0),
        )?;
    }
    // Silver chin, slightly deeper than the bezels.
    draw_panel(
        frame,
        0.09,
        vec3(width, silver_height, 0.3),
        base + vec3(0.0, silver_height / 2.0, 0.05),
    )?;
    // Black strip between the chin and the screen.
    draw_panel(
        frame,
        0.0,
        vec3(width, strip, 0.2),
        base + vec3(0.0, silver_height + strip / 2.0, 0.0),
    )?;

    let screen_height = total_height - silver_height - strip - bezel;
    frame.color(1.0, 1.0, 1.0, 1.0);
    frame.transform(Transform::placed(
        [width - 1.0, screen_height, 0.05],
        base + vec3(0.0, silver_height + strip + screen_height / 2.0, 0.05),
    ));
    frame.draw(Primitive::Box)?;

    draw_monitor_stand(frame, base)
}

fn draw_monitor_stand(frame: &mut Frame<'_>, monitor: Vector3<f32>) -> anyhow::Result<()> {
    frame.material("silver")?;

    draw_panel(
        frame,
        0.82,
        vec3(7.0, 0.3, 5.0),
        vec3(monitor.x, 0.15, monitor.z - 2.0),
    )?;

    // The arm leans back towards the base plate.
    frame.transform(Transform::new(
        [0.8, 8.2, 0.8],
        22.5,
        0.0,
        0.0,
        [monitor.x, 0.15, monitor.z - 3.6],
    ));
    frame.draw(Primitive::TaperedCylinder)?;

    draw_panel(
        frame,
        0.08,
        vec3(1.8, 0.5, 0.8),
        vec3(monitor.x, monitor.y + 3.45, monitor.z - 0.5),
    )
}

/// A stack of three books that the vase stands on.
pub(super) fn draw_books(
    frame: &mut Frame<'_>,
    vase_base: Vector3<f32>,
    desk_height: f32,
) -> anyhow::Result<()> {
    let gray = vec3(vase_base.x, desk_height + 1.25, vase_base.z + 0.2);
    let black = gray + vec3(0.2, 1.25 + 0.625, -0.2);
    let light_blue = black + vec3(-0.2, 0.625 + 0.625, 0.2);

    let books = [
        ("gray_book", [0.5, 0.5, 0.5], vec3(10.5, 2.5, 4.5), gray),
        ("black_book", [0.1, 0.1, 0.1], vec3(9.5, 1.25, 4.0), black),
        ("light_blue_book", [0.4, 0.6, 0.8], vec3(9.0, 1.25, 3.5), light_blue),
    ];
    for (material, [r, g, b], scale, position) in books {
        frame.color(r, g, b, 1.0);
        frame.material(material)?;
        frame.transform(Transform::placed(scale, position));
        frame.draw(Primitive::Box)?;
    }
    Ok(())
}

/// Open-fronted shelf unit with five shelves, each with a lip at the front.
pub(super) fn draw_organizer(frame: &mut Frame<'_>, desk_height: f32) -> anyhow::Result<()> {
    let center = vec3(18.0, desk_height, 2.0);
    let (width, depth, height) = (6.0, 8.0, 10.0);
    let base_height = 0.5;
    let wall = 0.2;
    let shelf_count = 5;
    let spacing = (height - base_height) / shelf_count as f32;
    let wall_y = base_height + height / 2.0;

    frame.color(0.8, 0.8, 0.8, 1.0);
    frame.material("organizer")?;

    let mut boxes = vec![
        (
            vec3(width, base_height, depth),
            center + vec3(0.0, base_height / 2.0, 0.0),
        ),
        (
            vec3(width, height, wall),
            center + vec3(0.0, wall_y, -depth / 2.0 + wall / 2.0),
        ),
        (
            vec3(wall, height, depth),
            center + vec3(-width / 2.0 + wall / 2.0, wall_y, 0.0),
        ),
        (
            vec3(wall, height, depth),
            center + vec3(width / 2.0 - wall / 2.0, wall_y, 0.0),
        ),
    ];
    for i in 1..=shelf_count {
        let shelf_y = base_height + i as f32 * spacing;
        boxes.push((vec3(5.6, 0.2, 7.5), center + vec3(0.0, shelf_y, -0.25)));
        boxes.push((
            vec3(5.6, 1.0, 0.2),
            center + vec3(0.0, shelf_y + 0.5 - 0.1, 3.75 - 0.1),
        ));
    }

    for (scale, position) in boxes {
        frame.transform(Transform::placed(scale, position));
        frame.draw(Primitive::Box)?;
    }
    Ok(())
}
