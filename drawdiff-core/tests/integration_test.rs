use drawdiff_core::{
    to_svg, ChartLayout, ChartSettings, Dataset, DifficultyTable, HistogramChart, HoverState,
    PointerEvent, RegionRecord, Scene, Shape, TooltipController,
};

fn fixture() -> Dataset {
    let rows = [
        ("CA", 40.0), ("TX", 35.0), ("FL", 28.0), ("NY", 12.0), ("CO", 7.0), ("WY", 3.0),
        ("MD", 9.0), ("NM", 4.0), ("OH", 15.0), ("AZ", 20.0), ("PR", 1.0), ("TN", 11.0),
    ];
    Dataset::new(rows.iter().map(|&(c, n)| RegionRecord::new(c, n)).collect())
}

fn chart() -> HistogramChart {
    HistogramChart::new(DifficultyTable::builtin(), ChartSettings::default())
}

fn drawn(ds: &Dataset) -> Scene {
    let mut scene = Scene::new(960.0, 540.0);
    chart().render(Some(ds), Some(&mut scene));
    scene
}

#[test]
fn ten_bars_for_a_spread_dataset() {
    assert_eq!(drawn(&fixture()).bars().count(), 10);
}

#[test]
fn every_record_in_exactly_one_bin() {
    let ds = fixture();
    let hist = chart().histogram(&ds.states);
    assert_eq!(hist.total_members(), ds.states.len());
    for rec in &ds.states {
        let holding = hist.bins.iter().filter(|b| b.members.iter().any(|m| m.code == rec.code)).count();
        assert_eq!(holding, 1, "{} should sit in one bin", rec.code);
    }
    let scene = drawn(&ds);
    assert_eq!(scene.bars().map(|b| b.members).sum::<usize>(), ds.states.len());
}

#[test]
fn california_lands_in_its_bin() {
    let hist = chart().histogram(&fixture().states);
    let (i, bin) = hist.bins.iter().enumerate().find(|(_, b)| b.members.iter().any(|m| m.code == "CA")).unwrap();
    assert!(bin.x0 <= 9.51);
    assert!(9.51 < bin.x1 || (i + 1 == hist.bins.len() && 9.51 <= bin.x1));
    assert_eq!(hist.bin_for(9.51), Some(i));
}

#[test]
fn unknown_regions_score_five() {
    let hist = chart().histogram(&fixture().states);
    for code in ["AZ", "PR"] {
        let m = hist.bins.iter().flat_map(|b| &b.members).find(|m| m.code == code).unwrap();
        assert_eq!(m.difficulty, 5.0);
    }
}

#[test]
fn rendering_twice_gives_the_same_scene() {
    let ds = fixture();
    let mut scene = Scene::new(960.0, 540.0);
    chart().render(Some(&ds), Some(&mut scene));
    let first = scene.clone();
    chart().render(Some(&ds), Some(&mut scene));
    assert_eq!(scene, first);
}

#[test]
fn missing_data_or_surface_leaves_the_surface_alone() {
    let ds = fixture();
    let mut scene = drawn(&ds);
    let before = scene.clone();
    chart().render(None, Some(&mut scene));
    assert_eq!(scene, before);
    chart().render::<Scene>(Some(&ds), None);
    chart().render::<Scene>(None, None);
}

#[test]
fn bars_use_their_own_bin_width() {
    let ds = fixture();
    let scene = drawn(&ds);
    let hist = chart().histogram(&ds.states);
    let xs = drawdiff_core::LinearScale::new(hist.domain, (80.0, 880.0));
    for (bar, bin) in scene.bars().zip(&hist.bins) {
        let own = xs.map(bin.x1) - xs.map(bin.x0) - 1.0;
        assert!((bar.width - own).abs() < 1e-9);
        assert_eq!(bar.x, xs.map(bin.x0));
    }
}

#[test]
fn bar_fills_follow_bin_order() {
    let scene = drawn(&fixture());
    let fills: Vec<_> = scene.bars().map(|b| b.fill).collect();
    assert_eq!(fills[0], drawdiff_core::scale::interpolate_yl_gn_bu(0.0));
    assert_eq!(fills[9], drawdiff_core::scale::interpolate_yl_gn_bu(1.0));
}

#[test]
fn identical_scores_draw_one_bar() {
    let ds = Dataset::new(vec![RegionRecord::new("CO", 4.0), RegionRecord::new("WY", 6.0)]);
    let scene = drawn(&ds);
    let bars: Vec<_> = scene.bars().collect();
    assert_eq!(bars.len(), 1);
    assert!(bars[0].width.is_finite() && bars[0].width > 0.0);
    assert_eq!(bars[0].mean_count, Some(5.0));
    assert!(scene.axes().all(|a| a.ticks.iter().all(|t| t.position.is_finite())));
}

#[test]
fn empty_dataset_draws_axes_and_labels_only() {
    let scene = drawn(&Dataset::default());
    assert_eq!(scene.bars().count(), 0);
    assert_eq!(scene.axes().count(), 2);
    assert_eq!(scene.texts().count(), 2);
}

#[derive(Default)]
struct Tip {
    visible: bool,
    content: Vec<String>,
}

impl TooltipController for Tip {
    fn show(&mut self, _e: &PointerEvent, lines: &[String]) {
        self.visible = true;
        self.content = lines.to_vec();
    }
    fn move_to(&mut self, _e: &PointerEvent) {}
    fn hide(&mut self) {
        self.visible = false;
    }
}

#[test]
fn hovering_a_bar_shows_its_mean() {
    // CO and WY share score 0; each keeps its own count
    let ds = Dataset::new(vec![
        RegionRecord::new("CO", 10.0),
        RegionRecord::new("WY", 30.0),
        RegionRecord::new("MD", 2.0),
    ]);
    let scene = drawn(&ds);
    let first = scene.bars().next().unwrap().clone();
    let mut tip = Tip::default();
    let mut hover = HoverState::default();
    hover.pointer_moved(&scene, PointerEvent::new(first.x + 1.0, first.y + 1.0), "Gun Deaths", &mut tip);
    assert!(tip.visible);
    assert_eq!(tip.content, vec!["Difficulty Range: 0.00 - 1.00", "Average Gun Deaths: 20.00"]);
    hover.pointer_moved(&scene, PointerEvent::new(1.0, 1.0), "Gun Deaths", &mut tip);
    assert!(!tip.visible);
}

#[test]
fn cell_layout_fits_a_terminal() {
    let c = chart().with_layout(ChartLayout::cells());
    let mut scene = Scene::new(100.0, 30.0);
    c.render(Some(&fixture()), Some(&mut scene));
    let bottom = scene.axes().next().unwrap();
    assert!(bottom.ticks.len() <= 11);
    assert!(scene.bars().all(|b| b.x >= 6.0 && b.x + b.width <= 94.0));
    let svg = to_svg(&scene);
    assert_eq!(svg.matches("<rect").count(), 10);
    assert!(scene.shapes.iter().any(|s| matches!(s, Shape::Text(t) if t.bold)));
}
