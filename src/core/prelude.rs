#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        grid::GridRenderer,
        render::{Canvas, Primitive},
        view::Viewport,
        workspace::{MatrixProperties, Palette, Workspace},
        InvalidInputError,
    },
    util::{
        colour::Colour,
        linalg,
        linalg::{CharPoly, Eigenvalues, Mat2, SingularMatrixError, Vec2},
    },
};
