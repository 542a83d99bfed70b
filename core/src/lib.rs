// core: Submarines3D game logic, deterministic given an injected RNG.
//
// This module implements the three-level board state and operations for a
// grid-based naval/air combat game. Keep `Board` as the canonical authority
// for placement and strikes. Unit shapes are immutable per-type data; the
// orientation chosen for an instance is stored on that instance, so placing
// one unit can never disturb the shared description of its type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of vertical planes in every game box: depth, surface, air.
pub const NUM_LEVELS: usize = 3;

/// One of the three fixed vertical planes partitioning the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Depth,
    Surface,
    Air,
}

impl Level {
    /// All levels in index order.
    pub const ALL: [Level; NUM_LEVELS] = [Level::Depth, Level::Surface, Level::Air];

    /// Stable index of this level (0..NUM_LEVELS).
    pub fn index(self) -> usize {
        match self {
            Level::Depth => 0,
            Level::Surface => 1,
            Level::Air => 2,
        }
    }

    /// Inverse of `index`; `None` for anything outside 0..NUM_LEVELS.
    pub fn from_index(index: usize) -> Option<Level> {
        Level::ALL.get(index).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Depth => "depth",
            Level::Surface => "surface",
            Level::Air => "air",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Coord: a fixed-size board coordinate
//
// Row/column are usize so they index the grid directly; the level is carried
// as the typed enum rather than a raw integer, which removes one whole class
// of out-of-range input. Row/column bounds are enforced by placement and
// strike logic.
// ============================================================================
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
    pub level: Level,
}

impl Coord {
    pub fn new(row: usize, col: usize, level: Level) -> Self {
        Self { row, col, level }
    }
}

/// A shape is placed either as authored or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Normal,
    Transposed,
}

// Orientation is intentionally a small enum so it can be stored per placed
// instance; transposition is computed through accessors, never by rewriting
// the mask itself.

// ============================================================================
// Shape: an immutable 2-D occupancy mask
// ============================================================================

/// Occupancy mask of a unit type: `rows x cols` booleans, at least one of
/// them set. Transposition is resolved through the `orientation` parameter
/// of the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a mask from row-major cells. Rejects empty extents, a cell
    /// count that does not match them, and masks without any occupied cell.
    pub fn new(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self, Error> {
        if rows < 1 || cols < 1 {
            return Err(Error::invalid_configuration(
                "unit shape needs at least one row and one column",
            ));
        }
        if cells.len() != rows * cols {
            return Err(Error::invalid_configuration(format!(
                "unit shape cells ({}) do not match a {rows}x{cols} mask",
                cells.len()
            )));
        }
        if !cells.iter().any(|&occupied| occupied) {
            return Err(Error::invalid_configuration(
                "unit shape needs at least one occupied cell",
            ));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a mask from nested literals where non-zero means occupied.
    ///
    /// Panics if the literal is malformed (empty or ragged); intended for
    /// static tables such as the unit catalog.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let row_count = rows.len();
        let col_count = rows.first().map(|row| row.len()).unwrap_or(0);
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&cell| cell != 0))
            .collect();
        Self::new(row_count, col_count, cells).expect("shape literal must be well-formed")
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of occupied cells, which is also the component count of any
    /// unit placed from this shape.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    /// Row/column extent of the mask under `orientation`.
    pub fn extent(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Normal => (self.rows, self.cols),
            Orientation::Transposed => (self.cols, self.rows),
        }
    }

    /// Whether the oriented mask occupies `(row, col)`.
    pub fn occupied(&self, row: usize, col: usize, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Normal => self.cells[row * self.cols + col],
            Orientation::Transposed => self.cells[col * self.cols + row],
        }
    }

    /// Occupied offsets of the oriented mask, in row-major order. Component
    /// order of a placed unit follows this order.
    pub fn occupied_offsets(&self, orientation: Orientation) -> Vec<(usize, usize)> {
        let (height, width) = self.extent(orientation);
        let mut offsets = Vec::with_capacity(self.cell_count());
        for row in 0..height {
            for col in 0..width {
                if self.occupied(row, col, orientation) {
                    offsets.push((row, col));
                }
            }
        }
        offsets
    }

    /// True when the mask equals its own transpose (1x1 being the common
    /// case); both orientations would then describe the same footprint.
    pub fn is_transpose_symmetric(&self) -> bool {
        if self.rows != self.cols {
            return false;
        }
        (0..self.rows).all(|row| {
            (0..self.cols).all(|col| {
                self.occupied(row, col, Orientation::Normal)
                    == self.occupied(col, row, Orientation::Normal)
            })
        })
    }
}

// ============================================================================
// UnitSpec and the canonical unit catalog
// ============================================================================

/// Static description of a unit type. Specs are created once at process
/// start and shared (via `Arc`) by every instance placed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub shape: Shape,
    /// Plane the unit must occupy; `None` means the plane is drawn once per
    /// instance at placement time.
    pub fixed_level: Option<Level>,
    /// A fragile unit is destroyed by a single hit to any component.
    pub fragile: bool,
    /// At most one instance of a unique unit may exist per board; its death
    /// defeats the whole board.
    pub unique: bool,
}

/// The canonical unit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    /// Lives underwater, destroyed by a single hit.
    Submarine,
    /// Lives at sea level, requires every component to be hit.
    Destroyer,
    /// Lives in the air, destroyed by a single hit.
    Jet,
    /// One-of-a-kind commander; may live on any plane, and its death defeats
    /// the entire board.
    General,
}

impl UnitClass {
    pub const ALL: [UnitClass; 4] = [
        UnitClass::Submarine,
        UnitClass::Destroyer,
        UnitClass::Jet,
        UnitClass::General,
    ];

    /// Build the immutable spec for this unit type.
    pub fn spec(self) -> UnitSpec {
        match self {
            UnitClass::Submarine => UnitSpec {
                name: "Submarine".to_string(),
                shape: Shape::from_rows(&[&[1, 1, 1]]),
                fixed_level: Some(Level::Depth),
                fragile: true,
                unique: false,
            },
            UnitClass::Destroyer => UnitSpec {
                name: "Destroyer".to_string(),
                shape: Shape::from_rows(&[&[1, 1, 1, 1]]),
                fixed_level: Some(Level::Surface),
                fragile: false,
                unique: false,
            },
            UnitClass::Jet => UnitSpec {
                name: "Jet".to_string(),
                shape: Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0], &[0, 1, 0]]),
                fixed_level: Some(Level::Air),
                fragile: true,
                unique: false,
            },
            UnitClass::General => UnitSpec {
                name: "General".to_string(),
                shape: Shape::from_rows(&[&[1]]),
                fixed_level: None,
                fragile: true,
                unique: true,
            },
        }
    }
}

/// How many instances of one unit type a board should receive.
#[derive(Debug, Clone)]
pub struct UnitRequest {
    pub spec: UnitSpec,
    pub count: u32,
}

impl UnitRequest {
    pub fn new(spec: UnitSpec, count: u32) -> Self {
        Self { spec, count }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed board setup; surfaced synchronously at construction and
    /// never retried internally.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The bounded randomized search could not seat a unit. Callers may
    /// retry whole-board construction; no internal retry happens.
    #[error("cannot find a vacant space for `{unit}` at {level} level")]
    PlacementExhausted { unit: String, level: Level },

    /// The caller passed an out-of-grid coordinate to `strike`; the boundary
    /// layer is expected to validate raw input before calling in.
    #[error("coordinate ({row}, {col}) outside the {rows}x{cols} board")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl Error {
    fn invalid_configuration(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Occupancy grid: rows x cols x NUM_LEVELS tagged cells
// ============================================================================

/// Identity of a unit within its board (index into the board's unit list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning reference from a grid cell to one component of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub unit: UnitId,
    pub component: usize,
}

/// A grid cell either holds nothing or points at exactly one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(ComponentRef),
}

/// Three stacked `rows x cols` planes of cells. The grid is a lookup
/// structure: units own their components, cells only refer to them.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols * NUM_LEVELS],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn offset(&self, coord: Coord) -> usize {
        (coord.level.index() * self.rows + coord.row) * self.cols + coord.col
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[self.offset(coord)]
    }

    pub fn is_vacant(&self, row: usize, col: usize, level: Level) -> bool {
        matches!(self.cell(Coord::new(row, col, level)), Cell::Empty)
    }

    /// All vacant `(row, col)` cells of one plane, in row-major order.
    pub fn vacant_cells(&self, level: Level) -> Vec<(usize, usize)> {
        let mut vacant = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.is_vacant(row, col, level) {
                    vacant.push((row, col));
                }
            }
        }
        vacant
    }

    /// Write a component reference into an empty cell. Placement guarantees
    /// vacancy; two components may never share a cell.
    pub(crate) fn occupy(&mut self, coord: Coord, target: ComponentRef) {
        let offset = self.offset(coord);
        debug_assert!(matches!(self.cells[offset], Cell::Empty));
        self.cells[offset] = Cell::Occupied(target);
    }
}

// ============================================================================
// Placement engine: bounded randomized search for a free anchor
// ============================================================================

/// Top-left placement of an oriented shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// Find a non-overlapping, in-bounds anchor for `shape` on `level`, or
/// `None` when the plane cannot seat it.
///
/// The search enumerates shuffled vacant cells crossed with shuffled
/// orientations, so it is randomized but bounded: at most rows x cols x 2
/// candidates, each visited once. A transpose-symmetric mask contributes a
/// single orientation.
pub fn find_anchor<R: Rng + ?Sized>(
    shape: &Shape,
    level: Level,
    grid: &OccupancyGrid,
    rng: &mut R,
) -> Option<Anchor> {
    let mut orientations = vec![Orientation::Normal];
    if !shape.is_transpose_symmetric() {
        orientations.push(Orientation::Transposed);
    }
    orientations.shuffle(rng);

    let candidates: Vec<(Orientation, (usize, usize), Vec<(usize, usize)>)> = orientations
        .iter()
        .map(|&orientation| {
            (
                orientation,
                shape.extent(orientation),
                shape.occupied_offsets(orientation),
            )
        })
        .collect();

    // A shape taller and wider than the board in every orientation can never
    // seat; fail before scanning any cell.
    if !candidates
        .iter()
        .any(|&(_, (height, width), _)| height <= grid.rows() && width <= grid.cols())
    {
        return None;
    }

    let mut vacant = grid.vacant_cells(level);
    vacant.shuffle(rng);

    for (row, col) in vacant {
        for (orientation, (height, width), offsets) in &candidates {
            if row + height > grid.rows() || col + width > grid.cols() {
                continue;
            }
            let clear = offsets
                .iter()
                .all(|&(dr, dc)| grid.is_vacant(row + dr, col + dc, level));
            if clear {
                return Some(Anchor {
                    row,
                    col,
                    orientation: *orientation,
                });
            }
        }
    }

    None
}

// ============================================================================
// Units and components
// ============================================================================

/// One grid-cell hit point of a unit. `hit` only ever moves false -> true.
#[derive(Debug, Clone)]
pub struct Component {
    location: Coord,
    hit: bool,
}

impl Component {
    fn new(location: Coord) -> Self {
        Self {
            location,
            hit: false,
        }
    }

    pub fn location(&self) -> Coord {
        self.location
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    fn damage(&mut self) {
        self.hit = true;
    }
}

/// A live instance of a [`UnitSpec`]: the spec it was placed from, the plane
/// and anchor it landed on, and its components. `alive` only ever moves
/// true -> false.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    ordinal: u32,
    spec: Arc<UnitSpec>,
    level: Level,
    anchor: (usize, usize),
    orientation: Orientation,
    components: Vec<Component>,
    alive: bool,
}

impl Unit {
    fn materialize(id: UnitId, ordinal: u32, spec: Arc<UnitSpec>, level: Level, anchor: Anchor) -> Self {
        let components = spec
            .shape
            .occupied_offsets(anchor.orientation)
            .into_iter()
            .map(|(dr, dc)| Component::new(Coord::new(anchor.row + dr, anchor.col + dc, level)))
            .collect();
        Self {
            id,
            ordinal,
            spec,
            level,
            anchor: (anchor.row, anchor.col),
            orientation: anchor.orientation,
            components,
            alive: true,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Instance number within this unit's type on its board; display only.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn spec(&self) -> &UnitSpec {
        &self.spec
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Short display tag: type initial plus ordinal, e.g. "S0".
    pub fn tag(&self) -> String {
        let initial = self
            .spec
            .name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        format!("{initial}{}", self.ordinal)
    }

    /// Force the unit dead: every component becomes hit and `alive` drops.
    /// Idempotent, since both transitions are monotonic.
    fn destroy(&mut self) {
        for component in &mut self.components {
            component.damage();
        }
        self.alive = false;
    }

    /// Mark one component hit and resolve the unit's own life: a fragile
    /// unit dies outright, a sturdy one only once no intact component
    /// remains. Returns whether this hit destroyed the unit.
    fn resolve_component_hit(&mut self, component: usize) -> bool {
        self.components[component].damage();
        if !self.spec.fragile && self.components.iter().any(|c| !c.is_hit()) {
            return false;
        }
        self.destroy();
        true
    }
}

// ============================================================================
// Strike results and read-only snapshots
// ============================================================================

/// Outcome of a single strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// Empty cell, or a component that was already hit. No state changed.
    Miss,
    /// A component was damaged but its unit survives.
    Hit,
    /// The damaged component took its unit down.
    Destroyed(UnitId),
}

/// What a strike did, and whether it left the board defeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeReport {
    pub outcome: StrikeOutcome,
    pub defeated: bool,
}

/// One rendered grid cell: empty water/sky, an intact component tagged with
/// its owning unit, or a hit marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCell {
    Empty,
    Intact { tag: String },
    Hit,
}

/// Read-only view of a board for display: one `rows x cols` plane per level,
/// indexed `[level][row][col]`. Rendering mutates nothing, so repeated
/// snapshots of an untouched board are identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub owner: String,
    pub rows: usize,
    pub cols: usize,
    pub levels: Vec<Vec<Vec<ViewCell>>>,
}

// ============================================================================
// Board: one player's grid and fleet
// ============================================================================

/// One player's game box: an occupancy grid plus the units placed into it.
/// Construction populates everything; units are never added afterward.
#[derive(Debug, Clone)]
pub struct Board {
    id: Uuid,
    owner: String,
    grid: OccupancyGrid,
    units: Vec<Unit>,
}

impl Board {
    /// Validate the configuration and place every requested unit instance.
    ///
    /// Placement draws from `rng`: vacant cells and orientations are
    /// shuffled per unit, and a unit without a fixed level has its plane
    /// drawn once here, immutable afterward. Any failure discards the whole
    /// in-progress board.
    pub fn create<R: Rng + ?Sized>(
        owner: &str,
        size: (usize, usize),
        requests: &[UnitRequest],
        rng: &mut R,
    ) -> Result<Board, Error> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(Error::invalid_configuration(
                "player name must be a non-empty string",
            ));
        }
        let (rows, cols) = size;
        if rows < 1 || cols < 1 {
            return Err(Error::invalid_configuration(
                "minimum playable board area is 1x1",
            ));
        }
        if requests.is_empty() {
            return Err(Error::invalid_configuration(
                "at least one battle unit per board is expected",
            ));
        }
        for request in requests {
            if request.spec.name.trim().is_empty() {
                return Err(Error::invalid_configuration("unit type name is empty"));
            }
            if request.count == 0 {
                return Err(Error::invalid_configuration(format!(
                    "invalid count for unit `{}` (cannot be zero)",
                    request.spec.name
                )));
            }
            if request.spec.unique {
                let total: u32 = requests
                    .iter()
                    .filter(|other| other.spec.name == request.spec.name)
                    .map(|other| other.count)
                    .sum();
                if total > 1 {
                    return Err(Error::invalid_configuration(format!(
                        "no more than 1 unique unit `{}` allowed",
                        request.spec.name
                    )));
                }
            }
        }

        let mut grid = OccupancyGrid::new(rows, cols);
        let mut units: Vec<Unit> = Vec::new();
        let mut ordinals: HashMap<String, u32> = HashMap::new();

        for request in requests {
            let spec = Arc::new(request.spec.clone());
            for _ in 0..request.count {
                let level = match spec.fixed_level {
                    Some(level) => level,
                    None => Level::ALL[rng.gen_range(0..NUM_LEVELS)],
                };
                let anchor = find_anchor(&spec.shape, level, &grid, rng).ok_or_else(|| {
                    Error::PlacementExhausted {
                        unit: spec.name.clone(),
                        level,
                    }
                })?;
                let id = UnitId(units.len() as u32);
                let ordinal = ordinals.entry(spec.name.clone()).or_insert(0);
                let unit = Unit::materialize(id, *ordinal, Arc::clone(&spec), level, anchor);
                *ordinal += 1;
                for (index, component) in unit.components().iter().enumerate() {
                    grid.occupy(
                        component.location(),
                        ComponentRef {
                            unit: id,
                            component: index,
                        },
                    );
                }
                units.push(unit);
            }
        }

        Ok(Board {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            grid,
            units,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    /// Resolve a strike at `(row, col, level)`.
    ///
    /// An empty cell or an already-hit component is a `Miss` and changes
    /// nothing. A fresh component takes the damage and its unit resolves
    /// life or death; a dying unique unit drags every other unit on this
    /// board down with it. Out-of-range row/column is a caller contract
    /// violation, reported as `IndexOutOfRange`.
    pub fn strike(&mut self, row: usize, col: usize, level: Level) -> Result<StrikeReport, Error> {
        if !self.grid.in_bounds(row, col) {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }

        let outcome = match self.grid.cell(Coord::new(row, col, level)) {
            Cell::Empty => StrikeOutcome::Miss,
            Cell::Occupied(target) => {
                let index = target.unit.index();
                if self.units[index].components()[target.component].is_hit() {
                    StrikeOutcome::Miss
                } else if self.units[index].resolve_component_hit(target.component) {
                    if self.units[index].spec().unique {
                        self.cascade_defeat();
                    }
                    StrikeOutcome::Destroyed(target.unit)
                } else {
                    StrikeOutcome::Hit
                }
            }
        };

        Ok(StrikeReport {
            outcome,
            defeated: self.is_defeated(),
        })
    }

    /// The commander fell: force every unit on this board dead, whatever
    /// their remaining intact components.
    fn cascade_defeat(&mut self) {
        for unit in &mut self.units {
            unit.destroy();
        }
    }

    /// A board is defeated once all of its standard (non-unique) units are
    /// destroyed. Every unit is scanned; a single destroyed unit among
    /// survivors does not end the game. A fleet consisting only of unique
    /// units is defeated when all of them are gone.
    pub fn is_defeated(&self) -> bool {
        let mut saw_standard = false;
        for unit in &self.units {
            if unit.spec().unique {
                continue;
            }
            saw_standard = true;
            if unit.is_alive() {
                return false;
            }
        }
        if saw_standard {
            true
        } else {
            self.units.iter().all(|unit| !unit.is_alive())
        }
    }

    /// Render the per-level display view. Read-only.
    pub fn render_snapshot(&self) -> Snapshot {
        let mut levels = Vec::with_capacity(NUM_LEVELS);
        for level in Level::ALL {
            let mut plane = Vec::with_capacity(self.rows());
            for row in 0..self.rows() {
                let mut cells = Vec::with_capacity(self.cols());
                for col in 0..self.cols() {
                    let view = match self.grid.cell(Coord::new(row, col, level)) {
                        Cell::Empty => ViewCell::Empty,
                        Cell::Occupied(target) => {
                            let unit = &self.units[target.unit.index()];
                            if unit.components()[target.component].is_hit() {
                                ViewCell::Hit
                            } else {
                                ViewCell::Intact { tag: unit.tag() }
                            }
                        }
                    };
                    cells.push(view);
                }
                plane.push(cells);
            }
            levels.push(plane);
        }
        Snapshot {
            owner: self.owner.clone(),
            rows: self.rows(),
            cols: self.cols(),
            levels,
        }
    }
}
