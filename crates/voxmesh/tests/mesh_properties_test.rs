//! # Mesh Property Tests
//!
//! Whole-pipeline checks on real shapes:
//!
//! 1. **Closedness**: closed meshes enclose exactly the solid volume
//! 2. **Coverage**: every visible unit face is covered once, checked against `block-mesh`
//! 3. **Shading**: brightness stays inside the AO table and darkens inner corners
//! 4. **Caps**: open-end mode drops exactly the high-side faces
//! 5. **Determinism**: same grid, same bytes
//!
//! Run with: cargo test --test mesh_properties_test -- --nocapture

use std::collections::{HashMap, HashSet};

use block_mesh::ndshape::{RuntimeShape, Shape};
use block_mesh::{visible_block_faces, UnitQuadBuffer, Voxel, VoxelVisibility, RIGHT_HANDED_Y_UP_CONFIG};
use voxmesh::{
    build, AoSurface, Mesh, MeshError, MeshOptions, Mesher, MesherConfig, PlainSurface,
    SurfaceVariant, VoxelGrid, WalkableSurface, DEFAULT_AO_BRIGHTNESS,
};

const WARM: u32 = 0xC0_80_40;
const COOL: u32 = 0x40_80_C0;

// ============================================================================
// FIXTURES
// ============================================================================

/// Two-tone ball with a sealed cavity in the middle.
fn hollow_ball(n: usize) -> VoxelGrid {
    let c = (n as f32 - 1.0) / 2.0;
    let outer = n as f32 / 2.0 - 0.5;
    VoxelGrid::from_fn([n, n, n], |[x, y, z]| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2) + (z as f32 - c).powi(2)).sqrt();
        if d > outer || d < 1.5 {
            0
        } else if (y as f32) < c {
            WARM
        } else {
            COOL
        }
    })
    .unwrap()
}

/// Floor plate with walls along x = 0 and z = 0.
fn corner_room(n: usize) -> VoxelGrid {
    VoxelGrid::from_fn([n, 3, n], |[x, y, z]| {
        if y == 0 || x == 0 || z == 0 {
            WARM
        } else {
            0
        }
    })
    .unwrap()
}

fn triangles(mesh: &Mesh) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
    mesh.triangles()
        .map(|t| t.map(|v| v.position.map(f64::from)))
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Volume enclosed by the mesh, positive for outward winding.
fn signed_volume(mesh: &Mesh) -> f64 {
    triangles(mesh)
        .map(|[a, b, c]| dot(a, cross(b, c)) / 6.0)
        .sum()
}

/// Total triangle area.
fn surface_area(mesh: &Mesh) -> f64 {
    triangles(mesh)
        .map(|[a, b, c]| {
            let n = cross(sub(b, a), sub(c, a));
            dot(n, n).sqrt() / 2.0
        })
        .sum()
}

#[derive(Clone, Copy)]
struct Cell(u32);

impl Voxel for Cell {
    fn get_visibility(&self) -> VoxelVisibility {
        if self.0 == 0 {
            VoxelVisibility::Empty
        } else {
            VoxelVisibility::Opaque
        }
    }
}

/// Unit faces between solid and empty cells, counted by `block-mesh`.
fn reference_face_count(grid: &VoxelGrid) -> usize {
    let [nx, ny, nz] = grid.shape().map(|d| d as u32);
    let shape = RuntimeShape::<u32, 3>::new([nx + 2, ny + 2, nz + 2]);
    let mut voxels = vec![Cell(0); shape.size() as usize];
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let value = grid.get(x, y, z).unwrap();
                voxels[shape.linearize([x + 1, y + 1, z + 1]) as usize] = Cell(value);
            }
        }
    }

    let mut buffer = UnitQuadBuffer::new();
    visible_block_faces(
        &voxels,
        &shape,
        [0; 3],
        [nx + 1, ny + 1, nz + 1],
        &RIGHT_HANDED_Y_UP_CONFIG.faces,
        &mut buffer,
    );
    buffer.num_quads()
}

fn alphas(mesh: &Mesh) -> HashSet<u8> {
    mesh.colors().chunks_exact(4).map(|c| c[3]).collect()
}

// ============================================================================
// BASIC SHAPES
// ============================================================================

/// Test: an isolated voxel is a fully lit cube.
#[test]
fn test_single_voxel_is_six_lit_quads() {
    let grid = VoxelGrid::new([1, 1, 1], vec![0xFF_80_00]).unwrap();
    let mesh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();

    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertex_count(), 36);
    for v in mesh.vertices() {
        assert_eq!(v.color, Some([0xFF, 0x80, 0x00, 255]));
        let off_axis = v.normal.iter().filter(|&&n| n == 128).count();
        assert_eq!(off_axis, 2);
        assert!(v.normal.iter().all(|&n| (127..=129).contains(&n)));
    }
    assert!((signed_volume(&mesh) - 1.0).abs() < 1e-9);
}

/// Test: a uniform box merges every side into one quad.
#[test]
fn test_uniform_box_merges_to_six_quads() {
    let grid = VoxelGrid::filled([3, 4, 5], WARM).unwrap();
    let mesh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();

    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(alphas(&mesh), HashSet::from([255]));
    assert!((signed_volume(&mesh) - 60.0).abs() < 1e-9);
    assert!((surface_area(&mesh) - 94.0).abs() < 1e-9);
}

/// Test: faces of different colors never merge, and solid-solid faces vanish.
#[test]
fn test_two_colors_do_not_merge() {
    let grid = VoxelGrid::new([2, 1, 1], vec![WARM, COOL]).unwrap();
    let two_tone = Mesher::<PlainSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    assert_eq!(two_tone.quad_count(), 10);

    let grid = VoxelGrid::new([2, 1, 1], vec![WARM, WARM]).unwrap();
    let one_tone = Mesher::<PlainSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    assert_eq!(one_tone.quad_count(), 6);
}

/// Test: the empty grid produces an empty mesh with no error.
#[test]
fn test_empty_grid() {
    let grid = VoxelGrid::empty([8, 8, 8]).unwrap();
    for variant in [SurfaceVariant::Plain, SurfaceVariant::AmbientOcclusion, SurfaceVariant::Walkable] {
        let mesh = build(&grid, &MeshOptions::new(variant)).unwrap();
        assert!(mesh.is_empty());
    }
}

// ============================================================================
// CLOSEDNESS AND COVERAGE
// ============================================================================

/// Test: closed meshes enclose exactly the solid cells, cavity included.
#[test]
fn test_closed_mesh_encloses_solid_volume() {
    let grid = hollow_ball(12);
    let solid = grid.solid_count() as f64;

    for variant in [SurfaceVariant::Plain, SurfaceVariant::AmbientOcclusion] {
        let mesh = build(&grid, &MeshOptions::new(variant)).unwrap();
        let volume = signed_volume(&mesh);
        println!("{variant:?}: {} quads, volume {volume}", mesh.quad_count());
        assert!(
            (volume - solid).abs() < 1e-6,
            "{variant:?}: volume {volume} != {solid} solid cells"
        );
    }
}

/// Test: on a cuboid every edge is shared by two triangles of opposite winding.
#[test]
fn test_cuboid_edges_pair_up() {
    let grid = VoxelGrid::from_fn([6, 5, 7], |[x, y, z]| {
        let inside = (1..4).contains(&x) && (2..4).contains(&y) && (1..6).contains(&z);
        if inside {
            COOL
        } else {
            0
        }
    })
    .unwrap();

    for config in [MesherConfig::closed(), MesherConfig::open_end()] {
        let mesh = Mesher::<AoSurface>::new(config).mesh(&grid).unwrap();
        assert_eq!(mesh.quad_count(), 6);

        let mut edges: HashMap<([i64; 3], [i64; 3]), i32> = HashMap::new();
        for tri in mesh.triangles() {
            let p = tri.map(|v| v.position.map(|c| c as i64));
            for i in 0..3 {
                *edges.entry((p[i], p[(i + 1) % 3])).or_default() += 1;
            }
        }
        for (&(a, b), &count) in &edges {
            assert_eq!(count, 1, "edge {a:?}->{b:?} used {count} times");
            assert_eq!(edges.get(&(b, a)), Some(&1), "edge {a:?}->{b:?} has no twin");
        }
    }
}

/// Test: merged quads cover each visible unit face exactly once.
#[test]
fn test_coverage_matches_reference_visibility() {
    for grid in [hollow_ball(10), corner_room(6), VoxelGrid::filled([2, 7, 3], COOL).unwrap()] {
        let expected = reference_face_count(&grid);

        let plain = Mesher::<PlainSurface>::new(MesherConfig::closed());
        let (_, fields) = plain.surface_fields(plain.pad(&grid)).unwrap();
        let descriptors: usize = fields.iter().map(|f| f.face_count()).sum();
        assert_eq!(descriptors, expected);

        let mesh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
        assert!((surface_area(&mesh) - expected as f64).abs() < 1e-6);
        // Merging only ever reduces the quad count
        assert!(mesh.quad_count() <= expected);
    }
}

/// Test: open-end mode keeps only the low-side caps.
#[test]
fn test_open_end_drops_high_caps() {
    let grid = VoxelGrid::filled([2, 2, 2], WARM).unwrap();

    let closed = Mesher::<PlainSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    assert_eq!(closed.quad_count(), 6);

    let open = Mesher::<PlainSurface>::new(MesherConfig::open_end()).mesh(&grid).unwrap();
    assert_eq!(open.quad_count(), 3);
    for v in open.vertices() {
        assert!(v.normal.contains(&127), "open mesh kept a high cap: {:?}", v.normal);
    }

    // Same for the shaded variant, which pads deeper
    let open_ao = Mesher::<AoSurface>::new(MesherConfig::open_end()).mesh(&grid).unwrap();
    assert_eq!(open_ao.quad_count(), 3);
}

// ============================================================================
// SHADING
// ============================================================================

/// Test: AO brightness stays in the table and inner corners darken.
#[test]
fn test_ao_darkens_inner_corners() {
    let grid = corner_room(5);
    let mesh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    let seen = alphas(&mesh);

    assert!(seen.iter().all(|a| DEFAULT_AO_BRIGHTNESS.contains(a)));
    assert!(seen.contains(&255));
    // Floor cell touching both walls gets a corner with two solid sides
    assert!(seen.contains(&153));
    // Level 0 is unreachable: two solid sides already clamp to 1
    assert!(!seen.contains(&0));

    // Plain meshes of the same room are unshaded
    let plain = Mesher::<PlainSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    assert_eq!(alphas(&plain), HashSet::from([255]));
}

/// Test: a custom brightness table flows through to the vertices.
#[test]
fn test_custom_shading_table() {
    let options = MeshOptions::from_toml_str(
        "variant = \"ambient_occlusion\"\n[shading]\nao_brightness = [0, 10, 20, 30]\n",
    )
    .unwrap();
    let mesh = build(&corner_room(4), &options).unwrap();
    let seen = alphas(&mesh);

    assert!(seen.contains(&30));
    assert!(seen.contains(&10));
    assert!(seen.iter().all(|a| [10, 20, 30].contains(a)));
}

// ============================================================================
// PALETTE
// ============================================================================

/// Test: every vertex color comes from a grid value, listed once each.
#[test]
fn test_palette_round_trip() {
    let grid = hollow_ball(10);
    let mesh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();
    let palette = mesh.palette();

    assert_eq!(palette.values(), &[0, WARM, COOL]);
    let rgbs: HashSet<[u8; 3]> = mesh
        .colors()
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let expected: HashSet<[u8; 3]> = [WARM, COOL]
        .iter()
        .map(|&v| voxmesh::Rgb::from_packed(v).to_array())
        .collect();
    assert_eq!(rgbs, expected);
}

/// Test: too many distinct colors fail before anything is emitted.
#[test]
fn test_palette_overflow() {
    let grid = VoxelGrid::from_fn([32, 32, 32], |[x, y, z]| 1 + (x << 10 | y << 5 | z)).unwrap();
    let err = build(&grid, &MeshOptions::new(SurfaceVariant::Plain)).unwrap_err();
    assert!(matches!(err, MeshError::PaletteOverflow { capacity: 32767 }));

    // Exactly at capacity is fine
    let grid = VoxelGrid::from_fn([32, 32, 32], |[x, y, z]| x << 10 | y << 5 | z).unwrap();
    assert!(build(&grid, &MeshOptions::new(SurfaceVariant::Plain)).is_ok());
}

/// Test: bad shapes are rejected up front.
#[test]
fn test_invalid_shapes() {
    assert!(matches!(
        VoxelGrid::empty([0, 4, 4]),
        Err(MeshError::InvalidShape { .. })
    ));
    assert!(matches!(
        VoxelGrid::new([4, 4, 4], vec![0; 10]),
        Err(MeshError::LengthMismatch { expected: 64, actual: 10 })
    ));
}

// ============================================================================
// DETERMINISM
// ============================================================================

/// Test: repeated builds are byte-identical, across meshers too.
#[test]
fn test_deterministic_output() {
    let grid = hollow_ball(14);
    let mesher = Mesher::<AoSurface>::new(MesherConfig::closed());

    let first = mesher.mesh(&grid).unwrap();
    let second = mesher.mesh(&grid).unwrap();
    let fresh = Mesher::<AoSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.position_bytes(), fresh.position_bytes());
    assert_eq!(first.colors(), fresh.colors());
    assert_eq!(first.normals(), fresh.normals());
}

// ============================================================================
// WALKABLE SURFACE
// ============================================================================

/// Test: only upward floors, no colors, merged regardless of color.
#[test]
fn test_walkable_floors() {
    let grid = VoxelGrid::from_fn([4, 2, 4], |[x, y, z]| match (x, y, z) {
        (_, 0, _) => if (x + z) % 2 == 0 { WARM } else { COOL },
        (1, 1, 1) => COOL,
        _ => 0,
    })
    .unwrap();
    let mesh = Mesher::<WalkableSurface>::new(MesherConfig::closed()).mesh(&grid).unwrap();

    assert!(!mesh.has_colors());
    assert!(mesh.colors().is_empty());
    assert!(mesh.vertices().all(|v| v.normal == [128, 129, 128]));
    // 15 floor cells around the block, plus the block top
    assert!((surface_area(&mesh) - 16.0).abs() < 1e-9);
    // Checkerboard colors still merge
    assert!(mesh.quad_count() < 16);
}

// ============================================================================
// BORDER DATA
// ============================================================================

/// Test: neighbour data in the shell hides faces against it.
#[test]
fn test_filled_border_hides_faces() {
    let grid = VoxelGrid::new([1, 1, 1], vec![WARM]).unwrap();
    let mesher = Mesher::<PlainSurface>::new(MesherConfig::closed());

    // Solid neighbour on the +x side only
    let mut padded = mesher.pad(&grid);
    padded.fill_border(|[x, _, _]| if x == 1 { COOL } else { 0 });
    let mesh = mesher.build(padded).unwrap();
    assert_eq!(mesh.quad_count(), 5);
    assert!(mesh.vertices().all(|v| v.normal != [129, 128, 128]));
    // Shell colors are part of the palette
    assert!(mesh.palette().values().contains(&COOL));

    // Fully enclosed voxel has no visible faces
    let mut padded = mesher.pad(&grid);
    padded.fill_border(|_| COOL);
    assert!(mesher.build(padded).unwrap().is_empty());
}
