//! Plain-text report of edited transforms.
//!
//! One block per entity, local-space values with two decimals, so the numbers
//! can be pasted straight into the authored scene:
//!
//! ```text
//! Lamp
//! Position(0.00, 1.50, -2.00)
//! Rotation(0.00, 90.00, 0.00)
//! Scale(1.00, 1.00, 1.00)
//! ```

use std::io::{self, Write};

use glam::Vec3;
use void_scene::{EntityId, SceneGraph};

fn write_vec3<W: Write>(out: &mut W, label: &str, v: Vec3) -> io::Result<()> {
    writeln!(out, "{}({:.2}, {:.2}, {:.2})", label, tidy(v.x), tidy(v.y), tidy(v.z))
}

/// Round to the printed precision and fold `-0.0` into `0.0`, so Euler
/// extraction noise never shows up as `-0.00`.
fn tidy(x: f32) -> f32 {
    (x * 100.0).round() / 100.0 + 0.0
}

/// Write a block for each live entity in `entities`, separated by blank lines.
///
/// Destroyed handles are skipped.
pub fn write_report<W: Write>(scene: &SceneGraph, entities: &[EntityId], out: &mut W) -> io::Result<()> {
    let mut first = true;
    for &id in entities {
        let Some(entity) = scene.get(id) else {
            continue;
        };
        if !first {
            writeln!(out)?;
        }
        first = false;

        writeln!(out, "{}", entity.name)?;
        write_vec3(out, "Position", entity.transform.position)?;
        write_vec3(out, "Rotation", entity.transform.euler_degrees())?;
        write_vec3(out, "Scale", entity.transform.scale)?;
    }
    Ok(())
}

/// [`write_report`] into a `String`.
pub fn report_string(scene: &SceneGraph, entities: &[EntityId]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(scene, entities, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
