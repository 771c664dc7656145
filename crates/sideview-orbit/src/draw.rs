//! The per-frame orbit pass: filter, sample, and emit line primitives.

use glam::{Mat4, Vec3};
use tracing::{debug, warn};

use crate::conic::ConicOrbit;
use crate::error::OrbitError;
use crate::sampler::OrbitCurveSampler;
use crate::scaled_space::RenderTransform;
use crate::visibility::{DiscoveryLevels, OrbitDisplayMode, is_orbit_visible};

/// RGBA line color.
pub type OrbitColor = [f32; 4];

/// Default alpha applied to every orbit line.
pub const DEFAULT_LINE_ALPHA: f32 = 0.9;

/// Immediate-mode line surface bound to the active graphics context.
pub trait LineDrawer {
    /// Save the current matrices and load the camera's.
    fn load_matrices(&mut self, projection: Mat4, view: Mat4);
    /// Restore the matrices saved by [`load_matrices`](Self::load_matrices).
    fn restore_matrices(&mut self);
    /// Start a line-list primitive with the given color.
    fn begin_lines(&mut self, color: OrbitColor);
    /// Add one vertex; consecutive pairs form a segment.
    fn vertex(&mut self, point: Vec3);
    /// Finish the current primitive.
    fn end(&mut self);
}

/// Projection and view matrices of the camera being drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    /// Projection matrix.
    pub projection: Mat4,
    /// World-to-camera matrix.
    pub view: Mat4,
}

impl Default for CameraMatrices {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        }
    }
}

/// One orbit as supplied by the host for this frame.
pub struct OrbitEntry<'a> {
    /// The conic to draw.
    pub conic: &'a dyn ConicOrbit,
    /// Observer knowledge. `None` when the orbit has no renderer or no
    /// discovery info; such orbits are skipped.
    pub discovery: Option<DiscoveryLevels>,
    /// Line color. The alpha channel is replaced by the pass alpha.
    pub color: OrbitColor,
}

/// Everything the orbit pass reads for one camera render.
pub struct OrbitFrame<'a> {
    /// Orbits known to the host.
    pub orbits: &'a [OrbitEntry<'a>],
    /// Global display mode.
    pub display_mode: OrbitDisplayMode,
    /// Camera the lines are drawn for.
    pub camera: CameraMatrices,
    /// Local-to-render conversion applied to every sampled point.
    pub transform: &'a dyn RenderTransform,
}

/// Draws every visible orbit once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPass {
    sampler: OrbitCurveSampler,
    line_alpha: f32,
}

impl Default for OrbitPass {
    fn default() -> Self {
        Self::new(OrbitCurveSampler::default(), DEFAULT_LINE_ALPHA)
    }
}

impl OrbitPass {
    /// Create a pass from a sampler and the alpha to draw lines with.
    pub fn new(sampler: OrbitCurveSampler, line_alpha: f32) -> Self {
        Self {
            sampler,
            line_alpha: line_alpha.clamp(0.0, 1.0),
        }
    }

    /// The sampler used for every orbit.
    pub fn sampler(&self) -> &OrbitCurveSampler {
        &self.sampler
    }

    /// Alpha applied to line colors.
    pub fn line_alpha(&self) -> f32 {
        self.line_alpha
    }

    /// Draw all visible orbits of `frame` and return how many were drawn.
    ///
    /// Each orbit is sampled in full before its primitive is opened, and the
    /// camera matrices are only loaded once something is about to be drawn.
    /// On error the matrices are restored before returning, so the drawer is
    /// never left mid-primitive.
    pub fn draw_all_orbits<D>(&self, frame: &OrbitFrame<'_>, drawer: &mut D) -> Result<usize, OrbitError>
    where
        D: LineDrawer + ?Sized,
    {
        let mut drawn = 0;
        let mut matrices_loaded = false;

        for (index, entry) in frame.orbits.iter().enumerate() {
            let Some(discovery) = entry.discovery else {
                continue;
            };
            if !is_orbit_visible(frame.display_mode, discovery) {
                continue;
            }

            let line = match self
                .sampler
                .sample(entry.conic, |local| frame.transform.to_render(local))
            {
                Ok(line) => line,
                Err(err) => {
                    warn!(orbit = index, %err, "aborting orbit pass");
                    if matrices_loaded {
                        drawer.restore_matrices();
                    }
                    return Err(err);
                }
            };
            if line.is_empty() {
                continue;
            }

            if !matrices_loaded {
                drawer.load_matrices(frame.camera.projection, frame.camera.view);
                matrices_loaded = true;
            }

            let [r, g, b, _] = entry.color;
            drawer.begin_lines([r, g, b, self.line_alpha]);
            for &(from, to) in &line.segments {
                drawer.vertex(from);
                drawer.vertex(to);
            }
            drawer.end();
            drawn += 1;
        }

        if matrices_loaded {
            drawer.restore_matrices();
        }
        debug!(drawn, known = frame.orbits.len(), "orbit pass complete");
        Ok(drawn)
    }
}

/// One primitive captured by [`LineRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLines {
    /// Color passed to `begin_lines`.
    pub color: OrbitColor,
    /// Vertices in emission order.
    pub vertices: Vec<Vec3>,
}

impl RecordedLines {
    /// Number of complete segments.
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// A [`LineDrawer`] that stores everything it is given.
///
/// Used for headless runs and tests. Misuse of the begin/end protocol is
/// counted in `protocol_errors` instead of panicking.
#[derive(Debug, Clone, Default)]
pub struct LineRecorder {
    /// Completed primitives.
    pub primitives: Vec<RecordedLines>,
    /// Number of `load_matrices` calls.
    pub matrix_loads: usize,
    /// Current matrix stack depth.
    pub matrix_depth: usize,
    /// Last loaded camera matrices.
    pub matrices: Option<CameraMatrices>,
    /// Calls that broke the begin/vertex/end or load/restore pairing.
    pub protocol_errors: usize,
    current: Option<RecordedLines>,
}

impl LineRecorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a primitive is currently open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Total segments across all primitives.
    pub fn segment_count(&self) -> usize {
        self.primitives.iter().map(RecordedLines::segment_count).sum()
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl LineDrawer for LineRecorder {
    fn load_matrices(&mut self, projection: Mat4, view: Mat4) {
        self.matrix_loads += 1;
        self.matrix_depth += 1;
        self.matrices = Some(CameraMatrices { projection, view });
    }

    fn restore_matrices(&mut self) {
        if self.matrix_depth == 0 {
            self.protocol_errors += 1;
            return;
        }
        self.matrix_depth -= 1;
    }

    fn begin_lines(&mut self, color: OrbitColor) {
        if let Some(open) = self.current.take() {
            self.protocol_errors += 1;
            self.primitives.push(open);
        }
        self.current = Some(RecordedLines {
            color,
            vertices: Vec::new(),
        });
    }

    fn vertex(&mut self, point: Vec3) {
        match self.current.as_mut() {
            Some(lines) => lines.vertices.push(point),
            None => self.protocol_errors += 1,
        }
    }

    fn end(&mut self) {
        match self.current.take() {
            Some(lines) => {
                if lines.vertices.len() % 2 != 0 {
                    self.protocol_errors += 1;
                }
                self.primitives.push(lines);
            }
            None => self.protocol_errors += 1,
        }
    }
}
