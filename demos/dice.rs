//! Builds the dice set and logs where each face's number would be printed.
//!
//! Usage:
//! ```text
//! cargo run --example dice                 # every die
//! cargo run --example dice -- d10 d100     # selected dice
//! RUST_LOG=polydie=debug cargo run --example dice
//! ```

use std::error::Error;

use polydie::operations::query::FaceAnchors;
use polydie::render::{BufferExport, RenderTarget};
use polydie::DieKind;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for polydie and this demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("dice=info".parse().unwrap_or_default())
        .add_directive("polydie=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dice = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<DieKind>())
        .collect::<Result<Vec<_>, _>>()?;
    let dice = if dice.is_empty() {
        DieKind::ALL.to_vec()
    } else {
        dice
    };

    let mut export = BufferExport;
    for die in dice {
        let mesh = die.mesh()?;
        info!(
            %die,
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            faces = mesh.face_count(),
            volume = mesh.signed_volume(),
            "built"
        );

        for anchor in FaceAnchors::new(&mesh).execute() {
            let label = die.face_label(anchor.face).unwrap_or_default();
            info!(
                %die,
                face = anchor.face,
                %label,
                centroid = ?anchor.centroid,
                normal = ?anchor.normal,
                "label anchor"
            );
        }

        let buffers = export.accept(mesh)?;
        info!(%die, positions = buffers.positions.len(), "exported");
    }
    Ok(())
}
