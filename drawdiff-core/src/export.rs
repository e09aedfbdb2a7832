use std::fmt::Write as _;
use std::path::Path;
use drawdiff_common::Result;
use serde::Serialize;
use crate::histogram::Histogram;
use crate::scene::{Anchor, AxisOrient, Scene, Shape};

const TICK_SIZE: f64 = 6.0;

// --- headless summary ---

pub fn summary_rows(hist: &Histogram) -> Vec<String> {
    hist.bins
        .iter()
        .map(|b| {
            let mean = b.mean_count().map_or("-".to_owned(), |m| format!("{m:.2}"));
            let codes: Vec<&str> = b.members.iter().map(|m| m.code.as_str()).collect();
            format!("{:6.2} - {:6.2}  {:>4}  {:>10}  {}", b.x0, b.x1, b.len(), mean, codes.join(","))
        })
        .collect()
}

pub fn print_summary(hist: &Histogram) {
    println!("{:<16} {}", "Records:", hist.total_members());
    println!("{:<16} {:.2} - {:.2}", "Domain:", hist.domain.0, hist.domain.1);
    println!("{:<16} {}", "Bins:", hist.bins.len());
    println!();
    println!("{:^15}  {:>4}  {:>10}  {}", "range", "n", "mean count", "regions");
    for row in summary_rows(hist) {
        println!("{row}");
    }
}

// --- JSON export ---

#[derive(Serialize)]
struct BinDoc<'a> {
    x0: f64,
    x1: f64,
    members: usize,
    total_count: f64,
    mean_count: Option<f64>,
    regions: Vec<&'a str>,
}

pub fn histogram_json(hist: &Histogram) -> serde_json::Value {
    let bins: Vec<BinDoc> = hist
        .bins
        .iter()
        .map(|b| BinDoc {
            x0: b.x0,
            x1: b.x1,
            members: b.len(),
            total_count: b.total_count(),
            mean_count: b.mean_count(),
            regions: b.members.iter().map(|m| m.code.as_str()).collect(),
        })
        .collect();
    serde_json::json!({
        "domain": [hist.domain.0, hist.domain.1],
        "records": hist.total_members(),
        "bins": bins,
    })
}

pub fn export_json(output_path: &Path, hist: &Histogram) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &histogram_json(hist))?;
    Ok(())
}

// --- SVG export ---

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn anchor_attr(a: Anchor) -> &'static str {
    match a {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    }
}

pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = scene.width,
        h = scene.height
    );
    for shape in &scene.shapes {
        match shape {
            Shape::Bar(b) => {
                let _ = writeln!(
                    out,
                    r#"  <rect class="bar" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{:.2} - {:.2}: {}</title></rect>"#,
                    b.x, b.y, b.width, b.height, b.fill.to_hex(), b.x0, b.x1,
                    b.mean_count.map_or("n/a".to_owned(), |m| format!("{m:.2}"))
                );
            }
            Shape::Axis(a) => {
                let (r0, r1) = a.range;
                let _ = writeln!(out, r#"  <g class="axis" font-size="10" fill="none" stroke="currentColor">"#);
                match a.orient {
                    AxisOrient::Bottom => {
                        let _ = writeln!(out, r#"    <path d="M{r0:.2},{y:.2}H{r1:.2}"/>"#, y = a.offset);
                        for t in &a.ticks {
                            let _ = writeln!(
                                out,
                                r#"    <line x1="{x:.2}" y1="{y:.2}" x2="{x:.2}" y2="{y2:.2}"/><text x="{x:.2}" y="{ty:.2}" fill="currentColor" stroke="none" text-anchor="middle">{l}</text>"#,
                                x = t.position,
                                y = a.offset,
                                y2 = a.offset + TICK_SIZE,
                                ty = a.offset + TICK_SIZE + 12.0,
                                l = escape(&t.label)
                            );
                        }
                    }
                    AxisOrient::Left => {
                        let _ = writeln!(out, r#"    <path d="M{x:.2},{r0:.2}V{r1:.2}"/>"#, x = a.offset);
                        for t in &a.ticks {
                            let _ = writeln!(
                                out,
                                r#"    <line x1="{x2:.2}" y1="{y:.2}" x2="{x:.2}" y2="{y:.2}"/><text x="{tx:.2}" y="{y:.2}" dy="0.32em" fill="currentColor" stroke="none" text-anchor="end">{l}</text>"#,
                                x = a.offset,
                                x2 = a.offset - TICK_SIZE,
                                tx = a.offset - TICK_SIZE - 3.0,
                                y = t.position,
                                l = escape(&t.label)
                            );
                        }
                    }
                }
                let _ = writeln!(out, "  </g>");
            }
            Shape::Text(t) => {
                let weight = if t.bold { r#" font-weight="bold""# } else { "" };
                let _ = writeln!(
                    out,
                    r#"  <text x="{:.2}" y="{:.2}" text-anchor="{}" font-size="{}"{} fill="black">{}</text>"#,
                    t.x, t.y, anchor_attr(t.anchor), t.font_size, weight, escape(&t.content)
                );
            }
        }
    }
    out.push_str("</svg>\n");
    out
}

pub fn export_svg(output_path: &Path, scene: &Scene) -> Result<()> {
    std::fs::write(output_path, to_svg(scene))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyTable;
    use crate::histogram::bin_records;
    use drawdiff_common::RegionRecord;

    fn hist() -> Histogram {
        let recs = vec![RegionRecord::new("CO", 10.0), RegionRecord::new("WY", 30.0), RegionRecord::new("MD", 4.0)];
        bin_records(&recs, &DifficultyTable::builtin(), 10)
    }

    #[test]
    fn json_has_every_bin() {
        let doc = histogram_json(&hist());
        assert_eq!(doc["records"], 3);
        assert_eq!(doc["bins"].as_array().unwrap().len(), 10);
        assert_eq!(doc["bins"][0]["mean_count"], 20.0);
        assert_eq!(doc["bins"][0]["regions"], serde_json::json!(["CO", "WY"]));
        assert!(doc["bins"][1]["mean_count"].is_null());
    }

    #[test]
    fn summary_rows_list_regions() {
        let rows = summary_rows(&hist());
        assert_eq!(rows.len(), 10);
        assert!(rows[0].ends_with("CO,WY"));
        assert!(rows[9].contains("4.00"));
    }

    #[test]
    fn svg_escapes_text() {
        let mut scene = Scene::new(10.0, 10.0);
        crate::scene::DrawingSurface::draw(&mut scene, Shape::Text(crate::scene::Text {
            x: 1.0, y: 2.0, anchor: Anchor::End, font_size: 10.0, bold: false, content: "a<b & \"c\"".into(),
        }));
        let svg = to_svg(&scene);
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn export_json_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.json");
        export_json(&path, &hist()).unwrap();
        let back: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["domain"], serde_json::json!([0.0, 10.0]));
    }
}
