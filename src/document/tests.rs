//! Unit tests for the in-memory map document.

use bevy::math::{DVec2, Rect, Vec2};

use super::*;

fn triangle(offset: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(offset, 0.0),
        DVec2::new(offset + 10.0, 0.0),
        DVec2::new(offset, 10.0),
    ]
}

fn document_with_layer() -> (MapDocument, LayerId) {
    let mut document = MapDocument::new(Extent::new(0.0, 0.0, 200.0, 100.0), Vec2::new(400.0, 200.0));
    let layer = document.add_layer("Roads");
    (document, layer)
}

#[test]
fn test_default_document_is_one_unit_per_pixel() {
    let document = MapDocument::default();
    assert_eq!(document.view_extent(), Extent::new(0.0, 0.0, 1600.0, 900.0));
    assert_eq!(document.viewport_size(), Vec2::new(1600.0, 900.0));
    assert!(document.layers().is_empty());
}

#[test]
fn test_push_shape_appends_in_order() {
    let (mut document, layer) = document_with_layer();
    let a = document
        .push_shape(layer, Geometry::Point(DVec2::ZERO), AttributeRow::default())
        .unwrap();
    let b = document
        .push_shape(layer, Geometry::Point(DVec2::ONE), AttributeRow::default())
        .unwrap();

    assert_eq!(document.shape_ids(layer), [a.shape, b.shape]);
    assert_eq!(document.layer_len(layer), Some(2));
    assert_eq!(document.shape(b).map(|s| s.index), Some(1));
}

#[test]
fn test_insert_shape_validation() {
    let (mut document, layer) = document_with_layer();
    let id = document.allocate_shape_id();

    let past_end = document.insert_shape(layer, id, Geometry::Point(DVec2::ZERO), 1, AttributeRow::default());
    assert!(matches!(past_end, Err(MutationError::Validation(_))));

    let unknown_layer = document.insert_shape(
        LayerId(9),
        id,
        Geometry::Point(DVec2::ZERO),
        0,
        AttributeRow::default(),
    );
    assert!(matches!(unknown_layer, Err(MutationError::NotFound(_))));

    document
        .insert_shape(layer, id, Geometry::Point(DVec2::ZERO), 0, AttributeRow::default())
        .unwrap();
    let duplicate = document.insert_shape(layer, id, Geometry::Point(DVec2::ZERO), 0, AttributeRow::default());
    assert!(matches!(duplicate, Err(MutationError::Validation(_))));
}

#[test]
fn test_remove_missing_shape_is_not_found() {
    let (mut document, layer) = document_with_layer();
    let result = document.remove_shape(layer, ShapeId(3));
    assert!(matches!(result, Err(MutationError::NotFound(_))));
}

#[test]
fn test_degenerate_view_extent_rejected() {
    let (mut document, _) = document_with_layer();
    let result = document.set_view_extent(Extent::new(5.0, 5.0, 5.0, 10.0));
    assert!(matches!(result, Err(MutationError::Validation(_))));
    assert_eq!(document.view_extent(), Extent::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_hole_rules() {
    let (mut document, layer) = document_with_layer();
    let polygon = document
        .push_shape(layer, Geometry::polygon(triangle(0.0)), AttributeRow::default())
        .unwrap();
    let path = document
        .push_shape(
            layer,
            Geometry::Polyline(vec![DVec2::ZERO, DVec2::ONE]),
            AttributeRow::default(),
        )
        .unwrap();

    let too_small = document.add_hole(polygon, 0, 0, &[DVec2::ZERO, DVec2::ONE]);
    assert!(matches!(too_small, Err(MutationError::Validation(_))));

    let not_polygon = document.add_hole(path, 0, 0, &triangle(1.0));
    assert!(matches!(not_polygon, Err(MutationError::Validation(_))));

    let bad_part = document.add_hole(polygon, 1, 0, &triangle(1.0));
    assert!(matches!(bad_part, Err(MutationError::NotFound(_))));

    document.add_hole(polygon, 0, 0, &triangle(1.0)).unwrap();
    assert_eq!(document.hole(polygon, 0, 0), Some(triangle(1.0)));

    let missing = document.remove_hole(polygon, 0, 1);
    assert!(matches!(missing, Err(MutationError::NotFound(_))));
    document.remove_hole(polygon, 0, 0).unwrap();
    assert_eq!(document.hole(polygon, 0, 0), None);
}

#[test]
fn test_vertex_rules() {
    let (mut document, layer) = document_with_layer();
    let point = document
        .push_shape(layer, Geometry::Point(DVec2::ZERO), AttributeRow::default())
        .unwrap();
    let polygon = document
        .push_shape(layer, Geometry::polygon(triangle(0.0)), AttributeRow::default())
        .unwrap();

    // Points can move but never gain or lose vertices
    document.move_vertex(point.into(), 0, DVec2::ONE).unwrap();
    assert_eq!(document.point_sequence(point.into()), Some(vec![DVec2::ONE]));
    assert!(matches!(
        document.add_vertex(point.into(), 0, DVec2::ZERO),
        Err(MutationError::Validation(_))
    ));
    assert!(matches!(
        document.remove_vertex(point.into(), 0),
        Err(MutationError::Validation(_))
    ));

    // A triangle is already at its minimum
    assert!(matches!(
        document.remove_vertex(polygon.into(), 0),
        Err(MutationError::Validation(_))
    ));
    assert!(matches!(
        document.move_vertex(polygon.into(), 3, DVec2::ZERO),
        Err(MutationError::NotFound(_))
    ));
    assert!(matches!(
        document.add_vertex(polygon.into(), 4, DVec2::ZERO),
        Err(MutationError::NotFound(_))
    ));

    document.add_vertex(polygon.into(), 3, DVec2::new(5.0, 5.0)).unwrap();
    document.remove_vertex(polygon.into(), 0).unwrap();
    assert_eq!(
        document.point_sequence(polygon.into()),
        Some(vec![
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(5.0, 5.0)
        ])
    );
}

#[test]
fn test_move_on_screen_scales_by_view() {
    // Half a map unit per pixel
    let (mut document, layer) = document_with_layer();
    let polygon = document
        .push_shape(layer, Geometry::polygon(triangle(0.0)), AttributeRow::default())
        .unwrap();

    document
        .move_on_screen(polygon.into(), Vec2::new(10.0, 10.0), Vec2::new(30.0, 0.0))
        .unwrap();

    assert_eq!(
        document.point_sequence(polygon.into()).unwrap()[0],
        DVec2::new(10.0, 5.0)
    );
}

#[test]
fn test_resize_on_screen_fills_rect() {
    let (mut document, layer) = document_with_layer();
    let polygon = document
        .push_shape(layer, Geometry::polygon(triangle(0.0)), AttributeRow::default())
        .unwrap();

    // Screen (0,160)-(40,200) is map (0,0)-(20,20)
    document
        .resize_on_screen(polygon.into(), Rect::new(0.0, 160.0, 40.0, 200.0))
        .unwrap();
    assert_eq!(
        document.shape_value(polygon).and_then(Geometry::bounds),
        Some(Extent::new(0.0, 0.0, 20.0, 20.0))
    );

    let flat = document.resize_on_screen(polygon.into(), Rect::new(0.0, 10.0, 40.0, 10.0));
    assert!(matches!(flat, Err(MutationError::Validation(_))));
}

#[test]
fn test_resize_point_is_rejected() {
    let (mut document, layer) = document_with_layer();
    let point = document
        .push_shape(layer, Geometry::Point(DVec2::ONE), AttributeRow::default())
        .unwrap();
    let result = document.resize_on_screen(point.into(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(matches!(result, Err(MutationError::Validation(_))));
}

#[test]
fn test_set_point_sequence_rules() {
    let (mut document, layer) = document_with_layer();
    let path = document
        .push_shape(
            layer,
            Geometry::Polyline(vec![DVec2::ZERO, DVec2::ONE]),
            AttributeRow::default(),
        )
        .unwrap();

    let too_short = document.set_point_sequence(path.into(), &[DVec2::ZERO]);
    assert!(matches!(too_short, Err(MutationError::Validation(_))));

    let points = [DVec2::ZERO, DVec2::new(1.0, 2.0), DVec2::new(3.0, 3.0)];
    document.set_point_sequence(path.into(), &points).unwrap();
    assert_eq!(document.point_sequence(path.into()), Some(points.to_vec()));
}

#[test]
fn test_graphics_bookkeeping() {
    let mut document = MapDocument::default();
    let a = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::ZERO));
    let b = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::ONE));

    document.add_graphic(a.clone()).unwrap();
    assert!(matches!(
        document.add_graphic(a.clone()),
        Err(MutationError::Validation(_))
    ));
    document.add_graphic(b.clone()).unwrap();

    // All-or-nothing when one id is unknown
    let result = document.remove_graphics(&[a.id, GraphicId(77)]);
    assert!(matches!(result, Err(MutationError::NotFound(_))));
    assert_eq!(document.graphics().len(), 2);

    document.remove_graphics(&[a.id, b.id]).unwrap();
    assert!(document.graphics().is_empty());
    assert!(matches!(
        document.remove_graphic(a.id),
        Err(MutationError::NotFound(_))
    ));
}

#[test]
fn test_equality_ignores_repaints() {
    let (mut document, _) = document_with_layer();
    let copy = document.clone();
    document.request_repaint();
    assert_eq!(document.repaint_requests(), 1);
    assert_eq!(document, copy);
}

#[test]
fn test_insert_graphic_keeps_drawing_order() {
    let mut document = MapDocument::default();
    let a = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::ZERO));
    let b = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::ONE));
    let c = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::X));

    document.add_graphic(b.clone()).unwrap();
    document.insert_graphic(a.clone(), 0).unwrap();
    document.insert_graphic(c.clone(), 2).unwrap();
    assert_eq!(document.graphics(), [a.clone(), b.clone(), c.clone()]);
    assert_eq!(document.graphic(c.id).map(|g| g.index), Some(2));

    let d = Graphic::new(document.allocate_graphic_id(), Geometry::Point(DVec2::Y));
    assert!(matches!(
        document.insert_graphic(d, 4),
        Err(MutationError::Validation(_))
    ));
    assert!(matches!(
        document.insert_graphic(a, 0),
        Err(MutationError::Validation(_))
    ));
}

#[test]
fn test_screen_bounds_follow_view() {
    // Half a map unit per pixel, y flipped
    let (mut document, layer) = document_with_layer();
    let polygon = document
        .push_shape(layer, Geometry::polygon(triangle(0.0)), AttributeRow::default())
        .unwrap();

    assert_eq!(
        document.world_to_screen(DVec2::new(10.0, 10.0)).unwrap(),
        Vec2::new(20.0, 180.0)
    );
    assert_eq!(
        document.screen_bounds(polygon.into()),
        Some(Rect::new(0.0, 180.0, 20.0, 200.0))
    );

    document.set_view_extent(Extent::new(0.0, 0.0, 100.0, 50.0)).unwrap();
    assert_eq!(
        document.screen_bounds(polygon.into()),
        Some(Rect::new(0.0, 160.0, 40.0, 200.0))
    );

    assert_eq!(document.screen_bounds(EditTarget::Graphic(GraphicId(5))), None);
}
