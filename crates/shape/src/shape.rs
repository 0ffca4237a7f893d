use crate::cache::CacheState;
use crate::geom::Polyline;
use crate::math::{vector, Angle, Point, Vector};
use crate::path::{Command, CommandBuffer, FillRule, PolylineGenerator, Resolution, ShapeBuilder};
use crate::style::{Color, Mode, Style};
use crate::tessellation::geometry_builder::simple_builder;
use crate::tessellation::{
    FillOptions, FillTessellator, TessellationError, TessellatorPool, VertexBuffers,
};

/// The triangle mesh of a filled path.
pub type Mesh = VertexBuffers<Point, u32>;

/// Number of times a path regenerated its derived geometry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GenerationStats {
    /// Times the polylines were regenerated (or brought up to date in polyline mode).
    pub polylines: u64,
    /// Times the mesh was tessellated.
    pub tessellations: u64,
}

/// Consumes the geometry of a path.
///
/// `color` is `None` when the path does not use its own colors, in which case the
/// renderer keeps its current color.
pub trait Renderer {
    fn fill(&mut self, mesh: &Mesh, color: Option<Color>, offset: Vector);

    fn stroke(
        &mut self,
        outline: &[Polyline],
        color: Option<Color>,
        line_width: f32,
        offset: Vector,
    );
}

/// A vector shape made of one or several sub-shapes.
///
/// The shape is described with drawing calls (`move_to`, `line_to`, curves, arcs and
/// the shapes of [`ShapeBuilder`]) and turned on demand into an outline (one polyline
/// per sub-shape) and a triangle mesh covering the regions selected by the fill rule.
/// Both are cached until something that affects them changes.
///
/// # Direct geometry edits
///
/// `translate`, `rotate`, `scale` and `simplify` modify the cached polylines, not
/// the commands. In `Mode::Commands`, anything that regenerates the polylines from
/// the commands afterwards (a new command, a resolution change, ...) discards those
/// edits.
///
/// # Examples
///
/// ```
/// use pathmesh_shape::Path;
/// use pathmesh_shape::math::point;
///
/// let mut path = Path::new();
/// path.rectangle(point(0.0, 0.0), 100.0, 100.0);
/// path.circle(point(50.0, 50.0), 25.0);
///
/// assert_eq!(path.outline().len(), 2);
///
/// // With the default even-odd rule the circle is a hole.
/// let mesh = path.tessellation();
/// assert!(!mesh.indices.is_empty());
/// ```
#[derive(Clone)]
pub struct Path {
    commands: CommandBuffer,
    polylines: Vec<Polyline>,
    mesh: Mesh,
    generator: PolylineGenerator,
    resolution: Resolution,
    style: Style,
    mode: Mode,
    cache: CacheState,
    has_changed: bool,
    stats: GenerationStats,
}

impl Path {
    pub fn new() -> Self {
        Self::with_style(Style::DEFAULT)
    }

    pub fn with_style(style: Style) -> Self {
        Path {
            commands: CommandBuffer::new(),
            polylines: Vec::new(),
            mesh: Mesh::new(),
            generator: PolylineGenerator::new(Resolution::DEFAULT),
            resolution: Resolution::DEFAULT,
            style,
            mode: Mode::Commands,
            cache: CacheState::new(),
            has_changed: true,
            stats: GenerationStats::default(),
        }
    }

    /// Removes all of the geometry, keeps the style.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.polylines.clear();
        self.mesh.clear();
        self.generator.reset();
        self.cache.commands_changed();
        self.has_changed = true;
    }

    // Drawing.

    pub fn move_to(&mut self, to: Point) {
        self.add_command(Command::MoveTo { to });
    }

    pub fn line_to(&mut self, to: Point) {
        self.add_command(Command::LineTo { to });
    }

    /// Adds a knot to the Catmull-Rom spline that starts at the current position.
    ///
    /// Consecutive `curve_to` calls form a single smooth curve going through every knot.
    pub fn curve_to(&mut self, to: Point) {
        self.add_command(Command::CurveTo { to });
    }

    /// Cubic bézier curve from the current position to `to`.
    pub fn bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.add_command(Command::BezierTo { to, ctrl1, ctrl2 });
    }

    /// Quadratic bézier curve from `ctrl1` to `to` with `ctrl2` as its control point.
    ///
    /// `ctrl1` is joined to the current position with a straight line.
    pub fn quad_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.add_command(Command::QuadBezierTo { to, ctrl1, ctrl2 });
    }

    /// Elliptic arc from `angle_begin` to `angle_end` (in degrees), towards increasing angles.
    pub fn arc(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        self.arc_with_direction(center, radius_x, radius_y, angle_begin, angle_end, true);
    }

    /// Elliptic arc towards increasing angles if `clockwise` is true, decreasing otherwise.
    pub fn arc_with_direction(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
        clockwise: bool,
    ) {
        self.add_command(Command::Arc {
            center,
            radius_x,
            radius_y,
            angle_begin,
            angle_end,
            clockwise,
        });
    }

    /// Elliptic arc towards decreasing angles.
    pub fn arc_negative(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        self.add_command(Command::ArcNegative {
            center,
            radius_x,
            radius_y,
            angle_begin,
            angle_end,
            clockwise: true,
        });
    }

    /// Closes the current sub-shape. The next drawing call starts a new one.
    pub fn close(&mut self) {
        self.add_command(Command::Close);
    }

    /// Ends the current sub-shape without closing it.
    ///
    /// The next drawing call starts a new sub-shape at the current position.
    pub fn new_sub_path(&mut self) {
        self.add_command(Command::NewSubPath);
    }

    pub fn rectangle(&mut self, origin: Point, w: f32, h: f32) {
        ShapeBuilder::rectangle(self, origin, w, h);
    }

    pub fn rect_rounded(&mut self, origin: Point, w: f32, h: f32, radius: f32) {
        ShapeBuilder::rect_rounded(self, origin, w, h, radius);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect_rounded_corners(
        &mut self,
        origin: Point,
        w: f32,
        h: f32,
        top_left: f32,
        top_right: f32,
        bottom_right: f32,
        bottom_left: f32,
    ) {
        ShapeBuilder::rect_rounded_corners(
            self,
            origin,
            w,
            h,
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        );
    }

    pub fn circle(&mut self, center: Point, radius: f32) {
        ShapeBuilder::circle(self, center, radius);
    }

    /// Ellipse of total width `w` and height `h`.
    pub fn ellipse(&mut self, center: Point, w: f32, h: f32) {
        ShapeBuilder::ellipse(self, center, w, h);
    }

    pub fn triangle(&mut self, a: Point, b: Point, c: Point) {
        ShapeBuilder::triangle(self, a, b, c);
    }

    fn add_command(&mut self, cmd: Command) {
        match self.mode {
            Mode::Commands => self.commands.push(cmd),
            Mode::Polylines => self.generator.add(&cmd, &mut self.polylines),
        }
        self.cache.commands_changed();
        self.has_changed = true;
    }

    // Style.

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replaces the whole style.
    pub fn set_style(&mut self, style: Style) {
        self.set_filled(style.filled);
        self.set_fill_rule(style.fill_rule);
        self.style = style;
    }

    pub fn is_filled(&self) -> bool {
        self.style.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        if filled != self.style.filled {
            self.style.filled = filled;
            self.cache.fill_changed();
        }
    }

    pub fn fill_color(&self) -> Color {
        self.style.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.style.fill_color = color;
    }

    pub fn set_fill_hex_color(&mut self, hex: u32) {
        self.set_fill_color(Color::from_hex(hex));
    }

    pub fn stroke_color(&self) -> Color {
        self.style.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color;
    }

    pub fn set_stroke_hex_color(&mut self, hex: u32) {
        self.set_stroke_color(Color::from_hex(hex));
    }

    /// Sets both the fill and the stroke colors.
    pub fn set_color(&mut self, color: Color) {
        self.set_fill_color(color);
        self.set_stroke_color(color);
    }

    pub fn set_hex_color(&mut self, hex: u32) {
        self.set_color(Color::from_hex(hex));
    }

    pub fn stroke_width(&self) -> f32 {
        self.style.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.style.stroke_width = width;
    }

    /// Whether the outline is drawn, which is the case when the stroke width is positive.
    pub fn has_outline(&self) -> bool {
        self.style.has_outline()
    }

    pub fn fill_rule(&self) -> FillRule {
        self.style.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        if rule != self.style.fill_rule {
            self.style.fill_rule = rule;
            self.cache.fill_rule_changed();
        }
    }

    pub fn use_shape_color(&self) -> bool {
        self.style.use_shape_color
    }

    pub fn set_use_shape_color(&mut self, use_shape_color: bool) {
        self.style.use_shape_color = use_shape_color;
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        if resolution != self.resolution {
            self.resolution = resolution;
            self.generator.set_resolution(resolution);
            self.cache.resolution_changed();
            self.has_changed = true;
        }
    }

    pub fn curve_resolution(&self) -> u32 {
        self.resolution.curve
    }

    /// Number of segments per bézier curve or Catmull-Rom span.
    pub fn set_curve_resolution(&mut self, resolution: u32) {
        self.set_resolution(self.resolution.with_curve(resolution));
    }

    pub fn circle_resolution(&self) -> u32 {
        self.resolution.circle
    }

    /// Number of segments per full turn of an arc.
    pub fn set_circle_resolution(&mut self, resolution: u32) {
        self.set_resolution(self.resolution.with_circle(resolution));
    }

    // Mode.

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches between recording commands and drawing directly into polylines.
    ///
    /// Going to `Mode::Polylines` keeps the current outline and continues drawing
    /// from it. Going back to `Mode::Commands` regenerates the outline from the
    /// recorded commands, dropping what was drawn in polyline mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }

        if mode == Mode::Polylines {
            self.update_polylines();
        }

        log::debug!("path mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.cache.mode_changed();
        self.has_changed = true;
    }

    // Queries.

    pub fn commands(&self) -> &[Command] {
        self.commands.as_slice()
    }

    /// The outline of the shape, one polyline per sub-shape.
    pub fn outline(&mut self) -> &[Polyline] {
        self.update_polylines();
        &self.polylines
    }

    /// Mutable access to the polylines for direct edits.
    ///
    /// Call `flag_shape_changed` afterwards so that the mesh is updated. In
    /// `Mode::Commands` this also regenerates the polylines from the commands,
    /// so direct edits are mostly useful in `Mode::Polylines`, where this ends
    /// a pending `curve_to` run.
    pub fn polylines_mut(&mut self) -> &mut Vec<Polyline> {
        self.commit_polylines();
        &mut self.polylines
    }

    /// Marks all of the derived geometry as stale.
    pub fn flag_shape_changed(&mut self) {
        self.cache.shape_changed();
        self.has_changed = true;
    }

    /// Whether the shape changed since the last call.
    pub fn has_changed(&mut self) -> bool {
        let changed = self.has_changed;
        self.has_changed = false;
        changed
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache
    }

    pub fn generation_stats(&self) -> GenerationStats {
        self.stats
    }

    /// The fill mesh, tessellated with a temporary tessellator if needed.
    pub fn try_tessellation(&mut self) -> Result<&Mesh, TessellationError> {
        if !self.cache.needs_tessellation() {
            return Ok(&self.mesh);
        }

        let mut tessellator = FillTessellator::new();
        self.try_tessellation_with(&mut tessellator)
    }

    /// The fill mesh, tessellated with the provided tessellator if needed.
    pub fn try_tessellation_with(
        &mut self,
        tessellator: &mut FillTessellator,
    ) -> Result<&Mesh, TessellationError> {
        self.update_polylines();

        if self.cache.needs_tessellation() {
            self.mesh.clear();

            if self.style.filled {
                log::trace!(
                    "tessellating {} polylines with {:?}",
                    self.polylines.len(),
                    self.style.fill_rule
                );

                let options = FillOptions::default().with_fill_rule(self.style.fill_rule);
                tessellator.tessellate(
                    &self.polylines,
                    &options,
                    &mut simple_builder(&mut self.mesh),
                )?;
            }

            self.cache.mesh_generated();
            self.stats.tessellations += 1;
        }

        Ok(&self.mesh)
    }

    /// The fill mesh.
    ///
    /// If the tessellation fails the error is logged and the mesh is empty.
    pub fn tessellation(&mut self) -> &Mesh {
        if let Err(e) = self.try_tessellation() {
            log::warn!("path tessellation failed: {}", e);
        }

        &self.mesh
    }

    /// The fill mesh, tessellated with the provided tessellator if needed.
    ///
    /// If the tessellation fails the error is logged and the mesh is empty.
    pub fn tessellation_with(&mut self, tessellator: &mut FillTessellator) -> &Mesh {
        if let Err(e) = self.try_tessellation_with(tessellator) {
            log::warn!("path tessellation failed: {}", e);
        }

        &self.mesh
    }

    /// The fill mesh, tessellated with a tessellator from `pool` if needed.
    pub fn tessellation_pooled(&mut self, pool: &TessellatorPool) -> &Mesh {
        if !self.cache.needs_tessellation() {
            return &self.mesh;
        }

        self.tessellation_with(&mut pool.checkout())
    }

    // Direct geometry edits.

    pub fn translate(&mut self, v: Vector) {
        self.edit_polylines(|polyline| polyline.translate(v));
    }

    /// Rotates the outline by `degrees` around `axis`.
    pub fn rotate(&mut self, degrees: f32, axis: Vector) {
        let angle = Angle::degrees(degrees);
        self.edit_polylines(|polyline| polyline.rotate(angle, axis));
    }

    /// Rotates the outline by `degrees` around the z axis.
    pub fn rotate_z(&mut self, degrees: f32) {
        self.rotate(degrees, crate::math::vector3(0.0, 0.0, 1.0));
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.edit_polylines(|polyline| polyline.scale(x, y));
    }

    /// Removes the points of the outline that deviate by less than `tolerance`.
    ///
    /// Typical tolerances are around `0.3`.
    pub fn simplify(&mut self, tolerance: f32) {
        self.edit_polylines(|polyline| polyline.simplify(tolerance));
    }

    /// Direct edits end a pending `curve_to` run in `Mode::Polylines`.
    fn edit_polylines(&mut self, mut edit: impl FnMut(&mut Polyline)) {
        self.commit_polylines();
        for polyline in &mut self.polylines {
            edit(polyline);
        }
        self.cache.geometry_edited();
        self.has_changed = true;
    }

    // Drawing.

    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.draw_at(0.0, 0.0, renderer);
    }

    /// Draws the mesh and the outline, offset by `(x, y)`.
    pub fn draw_at(&mut self, x: f32, y: f32, renderer: &mut dyn Renderer) {
        let offset = vector(x, y);
        let use_shape_color = self.style.use_shape_color;
        let pick = |color: Color| if use_shape_color { Some(color) } else { None };

        if self.style.filled {
            let color = pick(self.style.fill_color);
            renderer.fill(self.tessellation(), color, offset);
        }

        if self.style.has_outline() {
            let color = pick(self.style.stroke_color);
            let width = self.style.stroke_width;
            renderer.stroke(self.outline(), color, width, offset);
        }
    }

    fn update_polylines(&mut self) {
        if !self.cache.needs_polylines() {
            return;
        }

        match self.mode {
            Mode::Commands => {
                log::trace!("generating polylines from {} commands", self.commands.len());
                self.generator
                    .generate(self.commands.as_slice(), &mut self.polylines);
            }
            Mode::Polylines => {
                self.generator.preview(&mut self.polylines);
            }
        }

        self.cache.polylines_generated();
        self.stats.polylines += 1;
    }

    // Brings the polylines up to date and makes the provisional end of a pending
    // curve permanent, before the caller modifies them.
    fn commit_polylines(&mut self) {
        self.update_polylines();
        if self.mode == Mode::Polylines {
            self.generator.flush(&mut self.polylines);
        }
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBuilder for Path {
    fn move_to(&mut self, to: Point) {
        Path::move_to(self, to);
    }

    fn line_to(&mut self, to: Point) {
        Path::line_to(self, to);
    }

    fn arc(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        Path::arc(self, center, radius_x, radius_y, angle_begin, angle_end);
    }

    fn close(&mut self) {
        Path::close(self);
    }
}

impl std::fmt::Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("commands", &self.commands.len())
            .field("polylines", &self.polylines.len())
            .field("style", &self.style)
            .field("mode", &self.mode)
            .field("cache", &self.cache)
            .finish()
    }
}
