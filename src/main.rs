use anyhow::Result;
use gridbend::core::prelude::*;
use gridbend::util;

fn main() -> Result<()> {
    util::setup_log()?;

    let mut workspace = Workspace::new();
    workspace.set_matrix(2.0, 1.0, 0.0, 3.0)?;

    let props = workspace.properties();
    info!(
        "det = {}, trace = {}, rank = {}",
        props.determinant, props.trace, props.rank
    );
    info!(
        "characteristic polynomial: {}",
        props.characteristic_polynomial
    );
    info!("eigenvalues: {}", props.eigenvalues);
    if let Some((u1, u2)) = props.eigenvectors {
        info!("eigenvectors: u1 = {u1:.3}, u2 = {u2:.3}");
    }

    let viewport = Viewport::with_size(800.0, 600.0)?;
    let mut canvas = Canvas::new();
    workspace.render_frame(&viewport, &mut canvas);
    info!("rendered one frame: {} primitives", canvas.len());
    Ok(())
}
