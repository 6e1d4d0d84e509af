use super::*;
use crate::{ColorRgbw, Point};

#[test]
fn zero_threads_is_rejected() {
    let err = Engine::new(EngineOpts {
        threads: Some(0),
        ..EngineOpts::default()
    })
    .unwrap_err();
    assert!(matches!(err, PixelMapError::Validation(_)));

    let err = Engine::new(EngineOpts {
        parallel: true,
        threads: Some(0),
        ..EngineOpts::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: EngineOpts = serde_json::from_str(r#"{ "parallel": true }"#).unwrap();
    assert!(opts.parallel);
    assert!(opts.encode_output);
    assert!(opts.track_changes);
    assert_eq!(opts.threads, None);
}

#[test]
fn first_tick_builds_everything() {
    let mut p = Patch::new("p");
    let f = p.create_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2, 3);
    let engine = Engine::default();

    let report = engine.advance(&mut p);
    assert_eq!(report.layouts_reconciled, 1);
    assert_eq!(report.positions_updated, 1);
    assert!(report.render_area_updated);
    assert!(report.dmx_map_rebuilt);
    assert_eq!(report.universes_created, vec![0]);
    assert_eq!(report.universes_encoded, 1);
    assert_eq!(report.changed_universes, vec![0]);
    assert!(!p.dirty().any());

    let pixels = p.fixture(f).unwrap().pixels();
    assert_eq!(pixels[1].position, Point::new(10.0, 0.0));
}

#[test]
fn idle_tick_after_settling() {
    let mut p = Patch::new("p");
    p.create_circle(Point::new(0.0, 0.0), 2.0, 8, 4);
    let engine = Engine::default();
    engine.advance(&mut p);

    let report = engine.advance(&mut p);
    assert!(report.is_idle());
    assert_eq!(report.universes_encoded, 1);
}

#[test]
fn shapeless_fixtures_settle_after_one_tick() {
    let mut p = Patch::new("p");
    p.create_fixture(4, 3);
    p.create_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 2, 3);
    let engine = Engine::default();

    let report = engine.advance(&mut p);
    assert_eq!(report.positions_updated, 1);
    assert!(!p.dirty().any());
    assert!(engine.advance(&mut p).is_idle());
}

#[test]
fn color_changes_are_reported_without_markers() {
    let mut p = Patch::new("p");
    let f = p.create_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 4, 3);
    p.set_dmx_address(f, 3, 0).unwrap();
    let engine = Engine::default();
    engine.advance(&mut p);

    p.fill_color(f, ColorRgbw::rgb(255, 0, 0)).unwrap();
    assert!(!p.dirty().any());
    let report = engine.advance(&mut p);
    assert_eq!(report.changed_universes, vec![3]);
    assert_eq!(&p.universe(3).unwrap().channels()[..6], &[255, 0, 0, 255, 0, 0]);
}

#[test]
fn encoding_can_be_disabled() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(2, 3);
    let engine = Engine::new(EngineOpts {
        encode_output: false,
        ..EngineOpts::default()
    })
    .unwrap();
    engine.advance(&mut p);
    p.fill_color(f, ColorRgbw::rgb(1, 1, 1)).unwrap();
    let report = engine.advance(&mut p);
    assert_eq!(report.universes_encoded, 0);
    assert!(report.changed_universes.is_empty());
    assert!(p.universe(0).unwrap().channels().iter().all(|&b| b == 0));
}

#[test]
fn layout_change_cascades_into_the_map() {
    let mut p = Patch::new("p");
    let f = p.create_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 100, 3);
    p.set_dmx_address(f, 0, 500).unwrap();
    let engine = Engine::default();
    engine.advance(&mut p);
    assert_eq!(p.universe_ids(), vec![0, 1]);

    p.set_layout(f, 4, 3).unwrap();
    let report = engine.advance(&mut p);
    assert_eq!(report.layouts_reconciled, 1);
    assert_eq!(report.positions_updated, 1);
    assert_eq!(report.universes_destroyed, vec![1]);
    assert_eq!(p.fixture(f).unwrap().pixels().len(), 4);
    assert_eq!(p.universe_ids(), vec![0]);
}

#[test]
fn parallel_engine_encodes_like_sequential() {
    let build = || {
        let mut p = Patch::new("p");
        for i in 0..6u16 {
            let f = p.create_fixture(200, 3);
            p.set_dmx_address(f, i, i * 50).unwrap();
        }
        p
    };
    let mut seq = build();
    let mut par = build();
    let sequential = Engine::default();
    let parallel = Engine::new(EngineOpts {
        parallel: true,
        threads: Some(2),
        ..EngineOpts::default()
    })
    .unwrap();
    sequential.advance(&mut seq);
    parallel.advance(&mut par);
    let ids = seq.fixtures().map(|(id, _)| id).collect::<Vec<_>>();
    for (i, id) in ids.into_iter().enumerate() {
        let c = ColorRgbw::rgb(i as u8, 2, 3);
        seq.fill_color(id, c).unwrap();
        par.fill_color(id, c).unwrap();
    }
    let a = sequential.advance(&mut seq);
    let b = parallel.advance(&mut par);
    assert_eq!(a.changed_universes, b.changed_universes);
    for id in seq.universe_ids() {
        assert_eq!(
            seq.universe(id).unwrap().channels(),
            par.universe(id).unwrap().channels()
        );
    }
}

#[test]
fn advance_all_visits_every_patch() {
    let mut app = PixelMapper::new();
    for _ in 0..3 {
        let id = app.create_patch();
        app.patch_mut(id).unwrap().create_fixture(1, 1);
    }
    let reports = Engine::default().advance_all(&mut app);
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.dmx_map_rebuilt));
}
