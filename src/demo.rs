//! Demo host for the edit history: a small parcel map, a gizmo renderer and
//! a panel of buttons that each perform one recorded edit.

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use mapforge::config::{AppConfig, SetHistoryCapacityRequest};
use mapforge::document::{
    AttributeRow, DocumentQuery, EditTarget, Extent, Geometry, Graphic, GraphicStyle, LayerId,
    MapDocument, MutationError, PolygonPart, ShapeRef,
};
use mapforge::history::{
    capture, ClearHistoryRequest, EditLog, EditRecord, NewShape, RecentDiagnostics, SequenceEdit,
};

const HISTORY_CAPACITY_CHOICES: [Option<usize>; 4] = [Some(10), Some(50), Some(100), None];

/// Layers of the demo map
#[derive(Resource, Clone, Copy)]
struct DemoLayers {
    parcels: LayerId,
    fills: LayerId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DemoAction {
    AddParcel,
    DeleteFirstTwo,
    MergeAll,
    SplitFirst,
    CutHole,
    FillHole,
    NudgeVertex,
    Smooth,
    DragRight,
    Grow,
    ZoomIn,
    Sketch,
    ClearSketches,
    MarkSaved,
    Reload,
}

impl DemoAction {
    fn all() -> &'static [DemoAction] {
        &[
            DemoAction::AddParcel,
            DemoAction::DeleteFirstTwo,
            DemoAction::MergeAll,
            DemoAction::SplitFirst,
            DemoAction::CutHole,
            DemoAction::FillHole,
            DemoAction::NudgeVertex,
            DemoAction::Smooth,
            DemoAction::DragRight,
            DemoAction::Grow,
            DemoAction::ZoomIn,
            DemoAction::Sketch,
            DemoAction::ClearSketches,
            DemoAction::MarkSaved,
            DemoAction::Reload,
        ]
    }

    fn display_name(&self) -> &'static str {
        match self {
            DemoAction::AddParcel => "Add parcel",
            DemoAction::DeleteFirstTwo => "Delete first two",
            DemoAction::MergeAll => "Merge all parcels",
            DemoAction::SplitFirst => "Split first parcel",
            DemoAction::CutHole => "Cut hole",
            DemoAction::FillHole => "Fill hole",
            DemoAction::NudgeVertex => "Nudge vertex",
            DemoAction::Smooth => "Smooth outline",
            DemoAction::DragRight => "Drag right",
            DemoAction::Grow => "Grow on screen",
            DemoAction::ZoomIn => "Zoom in",
            DemoAction::Sketch => "Sketch graphic",
            DemoAction::ClearSketches => "Clear sketches",
            DemoAction::MarkSaved => "Mark saved",
            DemoAction::Reload => "Reload map",
        }
    }
}

fn square(origin: DVec2, size: f64) -> Vec<DVec2> {
    vec![
        origin,
        origin + DVec2::new(size, 0.0),
        origin + DVec2::new(size, size),
        origin + DVec2::new(0.0, size),
    ]
}

fn demo_document() -> (MapDocument, DemoLayers) {
    let mut document = MapDocument::default();
    let layers = DemoLayers {
        parcels: document.add_layer("Parcels"),
        fills: document.add_layer("Fills"),
    };
    for i in 0..3 {
        let origin = DVec2::new(200.0 + 250.0 * i as f64, 300.0);
        let row = AttributeRow::default().with("parcel", i as i64);
        if let Err(e) = document.push_shape(layers.parcels, Geometry::polygon(square(origin, 200.0)), row) {
            error!("Failed to build demo map: {}", e);
        }
    }
    (document, layers)
}

fn first_parcel(document: &MapDocument, layers: &DemoLayers) -> Result<ShapeRef, MutationError> {
    document
        .shape_ids(layers.parcels)
        .first()
        .map(|id| ShapeRef::new(layers.parcels, *id))
        .ok_or_else(|| MutationError::not_found("no parcels left"))
}

/// Insert a midpoint on every edge
fn subdivide(points: &[DVec2]) -> Vec<DVec2> {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .flat_map(|(a, b)| [*a, (*a + *b) * 0.5])
        .collect()
}

/// Build the record for `action` from the current document and perform it
fn perform_action(
    action: DemoAction,
    document: &mut MapDocument,
    layers: &DemoLayers,
    history: &mut EditLog,
    diagnostics: &mut RecentDiagnostics,
) -> Result<(), MutationError> {
    let record = match action {
        DemoAction::AddParcel => {
            let count = document.shape_ids(layers.parcels).len();
            let origin = DVec2::new(200.0 + 250.0 * count as f64, 50.0);
            let id = document.allocate_shape_id();
            capture::insert_shapes(
                &*document,
                layers.parcels,
                vec![NewShape {
                    id,
                    value: Geometry::polygon(square(origin, 150.0)),
                    row: AttributeRow::default().with("parcel", count as i64),
                }],
            )?
        }
        DemoAction::DeleteFirstTwo => {
            let shapes: Vec<ShapeRef> = document
                .shape_ids(layers.parcels)
                .into_iter()
                .take(2)
                .map(|id| ShapeRef::new(layers.parcels, id))
                .collect();
            capture::remove_shapes(&*document, &shapes)?
        }
        DemoAction::MergeAll => {
            let shapes: Vec<ShapeRef> = document
                .shape_ids(layers.parcels)
                .into_iter()
                .map(|id| ShapeRef::new(layers.parcels, id))
                .collect();
            // Stand-in for a real union: keep every part side by side
            let parts: Vec<PolygonPart> = shapes
                .iter()
                .filter_map(|s| match document.shape_value(*s) {
                    Some(Geometry::Polygon(parts)) => Some(parts.clone()),
                    _ => None,
                })
                .flatten()
                .collect();
            let id = document.allocate_shape_id();
            capture::merge_shapes(
                &*document,
                &shapes,
                NewShape {
                    id,
                    value: Geometry::Polygon(parts),
                    row: AttributeRow::default().with("parcel", "merged"),
                },
            )?
        }
        DemoAction::SplitFirst => {
            let first = first_parcel(document, layers)?;
            let Some(Geometry::Polygon(parts)) = document.shape_value(first).cloned() else {
                return Err(MutationError::validation("first parcel is not a polygon"));
            };
            if parts.len() < 2 {
                return Err(MutationError::validation("only multi-part parcels can be split"));
            }
            let pieces = parts
                .into_iter()
                .map(|part| NewShape {
                    id: document.allocate_shape_id(),
                    value: Geometry::Polygon(vec![part]),
                    row: AttributeRow::default(),
                })
                .collect();
            capture::split_shape(&*document, first, pieces)?
        }
        DemoAction::CutHole => {
            let first = first_parcel(document, layers)?;
            let bounds = document
                .shape_value(first)
                .and_then(Geometry::bounds)
                .ok_or_else(|| MutationError::not_found(first.to_string()))?;
            let size = bounds.width().min(bounds.height()) / 3.0;
            EditRecord::AddHole {
                polygon: first,
                part: 0,
                hole: 0,
                points: square(bounds.min + DVec2::splat(size), size),
            }
        }
        DemoAction::FillHole => {
            let first = first_parcel(document, layers)?;
            let points = document
                .hole(first, 0, 0)
                .ok_or_else(|| MutationError::not_found("first parcel has no hole"))?;
            let id = document.allocate_shape_id();
            capture::fill_hole(
                &*document,
                first,
                0,
                0,
                layers.fills,
                NewShape {
                    id,
                    value: Geometry::polygon(points),
                    row: AttributeRow::default(),
                },
            )?
        }
        DemoAction::NudgeVertex => {
            let target = EditTarget::Shape(first_parcel(document, layers)?);
            let current = document
                .point_sequence(target)
                .and_then(|points| points.first().copied())
                .ok_or_else(|| MutationError::not_found(target.to_string()))?;
            capture::move_vertex(&*document, target, 0, current + DVec2::new(-20.0, -20.0))?
        }
        DemoAction::Smooth => {
            let target = EditTarget::Shape(first_parcel(document, layers)?);
            let points = document
                .point_sequence(target)
                .ok_or_else(|| MutationError::not_found(target.to_string()))?;
            capture::set_point_sequence(&*document, target, subdivide(&points), SequenceEdit::Smooth)?
        }
        DemoAction::DragRight => EditRecord::MoveOnScreen {
            target: EditTarget::Shape(first_parcel(document, layers)?),
            from: Vec2::new(400.0, 400.0),
            to: Vec2::new(440.0, 400.0),
        },
        DemoAction::Grow => {
            let target = EditTarget::Shape(first_parcel(document, layers)?);
            let bounds = document
                .screen_bounds(target)
                .ok_or_else(|| MutationError::not_found(target.to_string()))?;
            capture::resize_on_screen(&*document, target, bounds.inflate(20.0))?
        }
        DemoAction::ZoomIn => {
            let view = document.view_extent();
            let inset = view.size() * 0.1;
            capture::viewport_change(
                &*document,
                Extent::from_corners(view.min + inset, view.max - inset),
            )
        }
        DemoAction::Sketch => {
            let id = document.allocate_graphic_id();
            let offset = 40.0 * document.graphics().len() as f64;
            let graphic = Graphic {
                id,
                geometry: Geometry::Polyline(vec![
                    DVec2::new(100.0, 700.0 - offset),
                    DVec2::new(400.0, 800.0 - offset),
                    DVec2::new(700.0, 700.0 - offset),
                ]),
                style: GraphicStyle {
                    color: Color::srgb(0.3, 0.7, 1.0),
                    stroke_width: 2.0,
                },
            };
            EditRecord::add_graphics(&[graphic])
        }
        DemoAction::ClearSketches => {
            let ids: Vec<_> = document.graphics().iter().map(|g| g.id).collect();
            if ids.is_empty() {
                return Ok(());
            }
            capture::remove_graphics(&*document, &ids)?
        }
        DemoAction::MarkSaved => {
            history.mark_saved();
            return Ok(());
        }
        // Handled by the panel, it swaps the whole document
        DemoAction::Reload => return Ok(()),
    };

    history.perform(record, document, diagnostics);
    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Left panel with one button per demo action
fn demo_panel_ui(
    mut contexts: EguiContexts,
    mut document: ResMut<MapDocument>,
    mut layers: ResMut<DemoLayers>,
    mut history: ResMut<EditLog>,
    mut diagnostics: ResMut<RecentDiagnostics>,
    mut clear_requests: MessageWriter<ClearHistoryRequest>,
    config: Res<AppConfig>,
    mut capacity_requests: MessageWriter<SetHistoryCapacityRequest>,
) -> Result {
    let mut clicked = None;
    egui::SidePanel::left("demo_actions")
        .default_width(180.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Edits");
            ui.separator();
            for action in DemoAction::all() {
                if ui.button(action.display_name()).clicked() {
                    clicked = Some(*action);
                }
            }
            ui.separator();
            ui.label("History size");
            ui.horizontal(|ui| {
                for capacity in HISTORY_CAPACITY_CHOICES {
                    let text = match capacity {
                        Some(n) => n.to_string(),
                        None => "All".to_string(),
                    };
                    let selected = config.data.history_capacity == capacity;
                    if ui.selectable_label(selected, text).clicked() && !selected {
                        capacity_requests.write(SetHistoryCapacityRequest { capacity });
                    }
                }
            });
            ui.separator();
            ui.label(format!(
                "{} undoable, {} redoable",
                history.undo_count(),
                history.redo_count()
            ));
            for label in history.undo_labels().take(10) {
                ui.label(egui::RichText::new(label).weak());
            }
        });

    match clicked {
        None => {}
        Some(DemoAction::Reload) => {
            let (fresh, fresh_layers) = demo_document();
            *document = fresh;
            *layers = fresh_layers;
            clear_requests.write(ClearHistoryRequest);
        }
        Some(action) => {
            if let Err(e) =
                perform_action(action, &mut document, &layers, &mut history, &mut diagnostics)
            {
                warn!("{} skipped: {}", action.display_name(), e);
            }
        }
    }
    Ok(())
}

/// Map coordinates to world coordinates through the current view extent
fn to_world(document: &MapDocument, point: DVec2) -> Vec2 {
    let view = document.view_extent();
    let viewport = document.viewport_size();
    let scale = DVec2::new(
        viewport.x as f64 / view.width(),
        viewport.y as f64 / view.height(),
    );
    ((point - (view.min + view.max) * 0.5) * scale).as_vec2()
}

fn draw_ring(gizmos: &mut Gizmos, document: &MapDocument, ring: &[DVec2], color: Color) {
    gizmos.linestrip_2d(
        ring.iter().chain(ring.first()).map(|p| to_world(document, *p)),
        color,
    );
}

fn draw_geometry(gizmos: &mut Gizmos, document: &MapDocument, geometry: &Geometry, color: Color) {
    match geometry {
        Geometry::Point(p) => {
            let center = to_world(document, *p);
            gizmos.line_2d(center - Vec2::X * 4.0, center + Vec2::X * 4.0, color);
            gizmos.line_2d(center - Vec2::Y * 4.0, center + Vec2::Y * 4.0, color);
        }
        Geometry::Polyline(points) => {
            gizmos.linestrip_2d(points.iter().map(|p| to_world(document, *p)), color);
        }
        Geometry::Polygon(parts) => {
            for part in parts {
                draw_ring(gizmos, document, &part.exterior, color);
                for hole in &part.holes {
                    draw_ring(gizmos, document, hole, color.with_alpha(0.6));
                }
            }
        }
    }
}

fn draw_document(document: Res<MapDocument>, layers: Res<DemoLayers>, mut gizmos: Gizmos) {
    for layer in document.layers() {
        let color = if layer.id == layers.fills {
            Color::srgb(0.9, 0.6, 0.2)
        } else {
            Color::srgb(0.85, 0.85, 0.85)
        };
        for shape in &layer.shapes {
            draw_geometry(&mut gizmos, &document, &shape.value, color);
        }
    }
    for graphic in document.graphics() {
        draw_geometry(&mut gizmos, &document, &graphic.geometry, graphic.style.color);
    }
}

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        let (document, layers) = demo_document();
        app.insert_resource(document)
            .insert_resource(layers)
            .add_systems(Startup, setup_camera)
            .add_systems(Update, draw_document)
            .add_systems(EguiPrimaryContextPass, demo_panel_ui);
    }
}
