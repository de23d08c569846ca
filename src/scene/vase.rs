//! Glass vase and the dried arrangement in it.
//!
//! All parts are placed relative to the vase base. Stems, puffs and flowers
//! spread out from the rim, which sits above the tapered neck.

use cgmath::{ElementWise, Vector3, vec3};

use super::Frame;
use crate::{
    data_structures::transform::Transform,
    resources::mesh::{Faces, Primitive},
};

const STEM_OFFSETS: [[f32; 3]; 4] = [
    [-0.6, 0.1, 0.2],
    [-0.5, 0.2, -0.25],
    [-0.1, 0.0, 0.6],
    [-0.2, 0.1, -0.55],
];

/// Offset from the rim, Y rotation and Z rotation of each main branch.
const BRANCHES: [([f32; 3], f32, f32); 3] = [
    ([0.4, 0.6, 0.3], 30.0, -15.0),
    ([-0.5, 0.8, -0.2], -25.0, 20.0),
    ([0.2, 1.0, -0.4], 10.0, 5.0),
];

const FLOWER_OFFSETS: [[f32; 3]; 6] = [
    [0.1, 0.2, 0.1],
    [-0.15, 0.3, -0.1],
    [0.0, 0.4, 0.2],
    [-0.2, 0.25, 0.15],
    [0.15, 0.35, -0.2],
    [-0.1, 0.4, -0.15],
];

const FLOWER_CLUSTERS: [[f32; 3]; 5] = [
    [0.5, 1.3, 0.4],
    [-0.6, 1.6, -0.3],
    [0.3, 2.2, -0.5],
    [-0.4, 1.9, 0.2],
    [0.2, 2.1, 0.3],
];

const SCATTERED_FLOWERS: [[f32; 3]; 6] = [
    [0.4, 1.7, 0.5],
    [-0.3, 2.0, -0.4],
    [0.15, 1.8, 0.6],
    [-0.5, 1.9, 0.3],
    [0.25, 2.3, -0.2],
    [-0.2, 2.1, 0.4],
];

const PUFF_COUNT: usize = 24;

/// Where stems, puffs and flowers grow from.
fn rim_anchor(base: Vector3<f32>) -> Vector3<f32> {
    base + vec3(0.0, 1.2 + 1.1 + 1.1 + 2.0, 0.0)
}

fn glass(frame: &mut Frame<'_>) -> anyhow::Result<()> {
    frame.texture("glass")?;
    frame.material("glass")
}

pub(super) fn draw_vase(frame: &mut Frame<'_>, base: Vector3<f32>) -> anyhow::Result<()> {
    glass(frame)?;
    frame.transform(Transform::placed([2.0, 1.2, 2.0], base));
    frame.draw(Primitive::Sphere)?;

    let neck = base + vec3(0.0, 0.8, 0.0);
    glass(frame)?;
    frame.transform(Transform::placed([1.5, 2.2, 1.5], neck));
    frame.draw(Primitive::TaperedCylinder)?;

    // Opening: wet glass on the walls, clear glass on both caps.
    frame.texture("vase_opening_side")?;
    frame.transform(Transform::placed([0.75, 2.0, 0.75], neck + vec3(0.0, 1.1 + 1.0, 0.0)));
    let cylinder = |top, bottom, sides| Faces::Cylinder { top, bottom, sides };
    frame.draw_faces(Primitive::Cylinder, cylinder(false, false, true))?;
    frame.texture("glass")?;
    frame.draw_faces(Primitive::Cylinder, cylinder(true, false, false))?;
    frame.draw_faces(Primitive::Cylinder, cylinder(false, true, false))?;

    glass(frame)?;
    frame.transform(Transform::new(
        [0.9, 0.9, 0.5],
        90.0,
        0.0,
        0.0,
        base + vec3(0.0, 1.8 + 1.1 + 2.0, 0.0),
    ));
    frame.draw(Primitive::Torus)
}

pub(super) fn draw_plants(frame: &mut Frame<'_>, base: Vector3<f32>) -> anyhow::Result<()> {
    let rim = rim_anchor(base);
    draw_stems(frame, rim)?;
    draw_puffs(frame, rim)?;
    draw_branches(frame, rim)?;
    draw_flowers(frame, rim)
}

fn draw_stems(frame: &mut Frame<'_>, rim: Vector3<f32>) -> anyhow::Result<()> {
    frame.texture("wood")?;
    frame.material("brown_stem")?;
    for offset in STEM_OFFSETS {
        let position = rim + Vector3::from(offset);
        frame.transform(Transform::new([0.1, 0.1, 1.5], -90.0, 25.0, 10.0, position));
        frame.draw(Primitive::TaperedCylinder)?;
    }
    Ok(())
}

/// Elongated puffs in a ring around the rim, each turned to face outwards.
fn draw_puffs(frame: &mut Frame<'_>, rim: Vector3<f32>) -> anyhow::Result<()> {
    frame.texture("beige_puff")?;
    frame.material("beige_puff")?;
    for i in 0..PUFF_COUNT {
        let angle = (360.0 * i as f32 / PUFF_COUNT as f32).to_radians();
        let spread = 0.8 + 0.4 * (i % 3) as f32;
        let position = vec3(
            rim.x + spread * angle.cos(),
            rim.y + 0.3 + 0.5 * (i % 4) as f32,
            rim.z + spread * angle.sin(),
        );
        frame.transform(Transform::new(
            [0.25, 0.25, 0.8],
            0.0,
            angle.to_degrees() + 90.0,
            0.0,
            position,
        ));
        frame.draw(Primitive::Sphere)?;
    }
    Ok(())
}

fn draw_branches(frame: &mut Frame<'_>, rim: Vector3<f32>) -> anyhow::Result<()> {
    for (offset, y_rotation, z_rotation) in BRANCHES {
        let root = rim + Vector3::from(offset);

        frame.texture("green_stem")?;
        frame.material("green_stem")?;
        frame.transform(Transform::new([0.06, 0.06, 2.5], -90.0, y_rotation, z_rotation, root));
        frame.draw(Primitive::TaperedCylinder)?;

        for i in 0..3 {
            let step = (i + 1) as f32 * 0.2;
            let twig = root + vec3(step, 1.0 + i as f32 * 0.8, step);

            frame.texture("green_stem")?;
            frame.material("green_stem")?;
            frame.transform(Transform::new(
                [0.04, 0.04, 1.5],
                -90.0,
                y_rotation + 25.0,
                z_rotation + 20.0,
                twig,
            ));
            frame.draw(Primitive::Cylinder)?;

            frame.texture("white_flower")?;
            frame.material("white_flower")?;
            for j in 0..2 {
                let j = j as f32;
                let bud = twig + vec3(0.1 * j, 0.5 + 0.4 * j, 0.1 * j);
                frame.transform(Transform::placed([0.1, 0.1, 0.1], bud));
                frame.draw(Primitive::Sphere)?;
            }
        }
    }
    Ok(())
}

fn draw_flowers(frame: &mut Frame<'_>, rim: Vector3<f32>) -> anyhow::Result<()> {
    frame.texture("white_flower")?;
    frame.material("white_flower")?;

    for cluster in FLOWER_CLUSTERS {
        for i in 0..3 {
            let offset = Vector3::from(FLOWER_OFFSETS[i % FLOWER_OFFSETS.len()]);
            let spread = vec3((i + 1) as f32, 0.8, if i % 2 == 1 { -1.0 } else { 1.0 });
            let position = rim + Vector3::from(cluster) + offset.mul_element_wise(spread);
            let size = 0.1 * (0.9 + 0.2 * (i % 3) as f32);
            frame.transform(Transform::new(
                [size, size, size],
                0.0,
                30.0 * (i % 4) as f32,
                15.0 * (i % 2) as f32,
                position,
            ));
            frame.draw(Primitive::Sphere)?;
        }
    }

    for (i, offset) in SCATTERED_FLOWERS.into_iter().enumerate() {
        let size = 0.1 * (0.85 + 0.1 * i as f32);
        frame.transform(Transform::new(
            [size, size, size],
            10.0 * (i % 3) as f32,
            45.0 * (i % 4) as f32,
            5.0 * (i % 2) as f32,
            rim + Vector3::from(offset),
        ));
        frame.draw(Primitive::Sphere)?;
    }
    Ok(())
}
