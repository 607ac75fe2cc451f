use log::{debug, info, trace};
use plist::{Dictionary, Value};

use graffle_core::{
    document::{
        Document, ExportShape, Graphic, LineGraphic, LinePath, MAX_GROUP_DEPTH, RichText,
        ShapedGraphic, Sheet,
    },
    draw::{PathOp, ShapeKind},
    error::{Error, Result},
    geometry::Rect,
};

use crate::{
    geometry::{parse_bounds, parse_point, parse_size},
    rtf,
    style::{FillPolicy, parse_style},
    value::{array_field, dict_field, flag_field, number_field, string_field},
};

/// Length of the identifiers that name export shapes.
const EXPORT_SHAPE_ID_LEN: usize = 36;

/// Default shaft ratio of adjustable arrows.
const DEFAULT_ARROW_RATIO: f64 = 0.5;

/// Settings applied while building a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Encoding label for rich-text runs that do not declare a codepage.
    pub default_encoding: String,
}

impl BuildConfig {
    /// Create a new BuildConfig with the given default text encoding
    pub fn new(default_encoding: impl Into<String>) -> Self {
        Self {
            default_encoding: default_encoding.into(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new("gbk")
    }
}

pub struct Builder {
    cfg: BuildConfig,
}

impl Builder {
    pub fn new(cfg: BuildConfig) -> Self {
        Self { cfg }
    }

    pub fn build(&self, root: &Dictionary) -> Result<Document> {
        let sheets = match root.get("Sheets") {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    let sheet = entry.as_dictionary().ok_or_else(|| {
                        Error::UnsupportedGraphic(format!("sheet {} is not a dictionary", idx + 1))
                    })?;
                    self.build_sheet(sheet, idx)
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::UnsupportedGraphic(
                    "`Sheets` is not an array".to_string(),
                ));
            }
            None => {
                debug!("No sheet list, treating the root as the only sheet");
                vec![self.build_sheet(root, 0)?]
            }
        };

        info!(sheets = sheets.len(); "Document built");
        Ok(Document::new(sheets))
    }

    // ============================================================================
    // Sheets
    // ============================================================================

    fn build_sheet(&self, sheet: &Dictionary, idx: usize) -> Result<Sheet> {
        let title = string_field(sheet, "SheetTitle")
            .map_or_else(|| format!("Canvas {}", idx + 1), str::to_string);

        let origin = string_field(sheet, "CanvasOrigin")
            .map(parse_point)
            .transpose()?;
        let size = string_field(sheet, "CanvasSize")
            .map(parse_size)
            .transpose()?;

        let export_shapes = array_field(sheet, "ExportShapes")
            .unwrap_or_default()
            .iter()
            .map(build_export_shape)
            .collect::<Result<Vec<_>>>()?;

        let graphics = self.build_graphics(array_field(sheet, "GraphicsList"), 0)?;

        debug!(
            title = title.as_str(),
            graphics = graphics.len(),
            export_shapes = export_shapes.len();
            "Sheet built"
        );

        Ok(Sheet::new(title, graphics)
            .with_canvas(origin, size)
            .with_export_shapes(export_shapes))
    }

    // ============================================================================
    // Graphics
    // ============================================================================

    fn build_graphics(&self, entries: Option<&[Value]>, depth: usize) -> Result<Vec<Graphic>> {
        entries
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                let graphic = entry.as_dictionary().ok_or_else(|| {
                    Error::UnsupportedGraphic("graphic entry is not a dictionary".to_string())
                })?;
                self.build_graphic(graphic, depth)
            })
            .collect()
    }

    fn build_graphic(&self, graphic: &Dictionary, depth: usize) -> Result<Graphic> {
        let class = string_field(graphic, "Class")
            .ok_or_else(|| Error::UnsupportedGraphic("graphic without a class".to_string()))?;

        match class {
            "LineGraphic" => build_line(graphic).map(Graphic::Line),
            "ShapedGraphic" => self.build_shaped(graphic).map(Graphic::Shaped),
            "Group" => {
                if depth >= MAX_GROUP_DEPTH {
                    return Err(Error::UnsupportedGraphic(format!(
                        "groups nested deeper than {MAX_GROUP_DEPTH} levels"
                    )));
                }
                let children = self.build_graphics(array_field(graphic, "Graphics"), depth + 1)?;
                trace!(depth, children = children.len(); "Group built");
                Ok(Graphic::Group(children))
            }
            other => Err(Error::UnsupportedGraphic(format!("graphic class `{other}`"))),
        }
    }

    fn build_shaped(&self, graphic: &Dictionary) -> Result<ShapedGraphic> {
        let bounds = string_field(graphic, "Bounds")
            .ok_or_else(|| Error::UnsupportedGraphic("shaped graphic without bounds".to_string()))
            .and_then(parse_bounds)?;
        let kind = shape_kind(graphic, bounds)?;
        let style = parse_style(dict_field(graphic, "Style"), FillPolicy::DefaultWhite)?;

        let text = dict_field(graphic, "Text")
            .and_then(|text| string_field(text, "Text"))
            .map(|raw| {
                let encoding = rtf::resolve_encoding(raw, &self.cfg.default_encoding);
                RichText::new(raw, encoding)
            });

        Ok(ShapedGraphic::new(kind, bounds, style)
            .with_text(text)
            .with_vflip(flag_field(graphic, "VFlip").unwrap_or(false)))
    }
}

fn build_line(graphic: &Dictionary) -> Result<LineGraphic> {
    let path = if let Some(logical) = dict_field(graphic, "LogicalPath") {
        let elements = array_field(logical, "elements").unwrap_or_default();
        LinePath::Logical(parse_path_elements(elements)?)
    } else if let Some(points) = array_field(graphic, "Points") {
        let points = points
            .iter()
            .map(|point| {
                point
                    .as_string()
                    .ok_or_else(|| Error::geometry(format!("{point:?}"), "point is not a string"))
                    .and_then(parse_point)
            })
            .collect::<Result<Vec<_>>>()?;
        LinePath::Points(points)
    } else {
        return Err(Error::UnsupportedGraphic(
            "line graphic without points or logical path".to_string(),
        ));
    };

    let style = parse_style(dict_field(graphic, "Style"), FillPolicy::Never)?;
    Ok(LineGraphic::new(path, style))
}

/// Selects the shape kind from the `Shape` discriminant.
fn shape_kind(graphic: &Dictionary, bounds: Rect) -> Result<ShapeKind> {
    let Some(shape) = string_field(graphic, "Shape") else {
        return Ok(ShapeKind::PlainRectangle);
    };

    let adjustable = || {
        let data = dict_field(graphic, "ShapeData");
        let ratio = data
            .and_then(|data| number_field(data, "ratio"))
            .unwrap_or(DEFAULT_ARROW_RATIO);
        let shaft_width = data
            .and_then(|data| number_field(data, "width"))
            .unwrap_or(bounds.height() / 2.0);
        (ratio, shaft_width)
    };

    let kind = match shape {
        "Circle" => ShapeKind::Circle,
        "Diamond" => ShapeKind::Diamond,
        "VerticalTriangle" => ShapeKind::VerticalTriangle,
        "HorizontalTriangle" => ShapeKind::HorizontalTriangle,
        "RightTriangle" => ShapeKind::RightTriangle,
        "Pentagon" => ShapeKind::Pentagon,
        "Octagon" => ShapeKind::Octagon,
        "Rectangle" => ShapeKind::PlainRectangle,
        "AdjustableArrow" => {
            let (ratio, shaft_width) = adjustable();
            ShapeKind::AdjustableArrow { ratio, shaft_width }
        }
        "AdjustableDoubleArrow" => {
            let (ratio, shaft_width) = adjustable();
            ShapeKind::AdjustableDoubleArrow { ratio, shaft_width }
        }
        id if is_export_shape_id(id) => ShapeKind::ExportedShape { id: id.to_string() },
        other => return Err(Error::UnsupportedGraphic(format!("shape `{other}`"))),
    };
    Ok(kind)
}

/// Export shapes are named by hyphenated 36-character identifiers.
fn is_export_shape_id(shape: &str) -> bool {
    shape.len() == EXPORT_SHAPE_ID_LEN
        && shape.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn build_export_shape(entry: &Value) -> Result<ExportShape> {
    let entry = entry.as_dictionary().ok_or_else(|| {
        Error::UnsupportedGraphic("export shape entry is not a dictionary".to_string())
    })?;
    let id = string_field(entry, "ShapeName")
        .ok_or_else(|| Error::UnsupportedGraphic("export shape without a name".to_string()))?;
    let elements = dict_field(entry, "StrokePath")
        .and_then(|path| array_field(path, "elements"))
        .unwrap_or_default();

    Ok(ExportShape::new(id, parse_path_elements(elements)?))
}

/// Parses `{element, point, control1, control2}` path records.
fn parse_path_elements(elements: &[Value]) -> Result<Vec<PathOp>> {
    elements
        .iter()
        .map(|element| {
            let element = element.as_dictionary().ok_or_else(|| {
                Error::UnsupportedGraphic("path element is not a dictionary".to_string())
            })?;
            let point = |key: &str| {
                string_field(element, key)
                    .ok_or_else(|| Error::geometry("", format!("path element without `{key}`")))
                    .and_then(parse_point)
            };

            match string_field(element, "element") {
                Some("MOVETO") => Ok(PathOp::MoveTo(point("point")?)),
                Some("LINETO") => Ok(PathOp::LineTo(point("point")?)),
                Some("CURVETO") => Ok(PathOp::CurveTo {
                    to: point("point")?,
                    control1: point("control1")?,
                    control2: point("control2")?,
                }),
                Some("CLOSE") => Ok(PathOp::Close),
                Some(other) => Err(Error::UnsupportedGraphic(format!("path element `{other}`"))),
                None => Err(Error::UnsupportedGraphic(
                    "path element without a kind".to_string(),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use graffle_core::{
        color::Rgb8,
        draw::ArrowKind,
        geometry::{Point, Size},
    };

    use super::*;

    fn dict(entries: Vec<(&str, Value)>) -> Dictionary {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    fn string(value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn shaped(shape: Option<&str>, bounds: &str) -> Value {
        let mut entries = vec![("Class", string("ShapedGraphic")), ("Bounds", string(bounds))];
        if let Some(shape) = shape {
            entries.push(("Shape", string(shape)));
        }
        Value::Dictionary(dict(entries))
    }

    fn sheet_with(graphics: Vec<Value>) -> Dictionary {
        dict(vec![("GraphicsList", Value::Array(graphics))])
    }

    fn build_one(graphic: Value) -> Result<Graphic> {
        let document = Builder::new(BuildConfig::default()).build(&sheet_with(vec![graphic]))?;
        Ok(document.sheets()[0].graphics()[0].clone())
    }

    #[test]
    fn test_single_sheet_document() {
        let root = dict(vec![
            ("CanvasOrigin", string("{10, 20}")),
            ("CanvasSize", string("{800, 600}")),
            ("GraphicsList", Value::Array(Vec::new())),
        ]);

        let document = Builder::new(BuildConfig::default()).build(&root).unwrap();
        let sheet = &document.sheets()[0];

        assert_eq!(document.sheets().len(), 1);
        assert_eq!(sheet.title(), "Canvas 1");
        assert_eq!(sheet.origin(), Point::new(10.0, 20.0));
        assert_eq!(sheet.size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_multi_sheet_titles() {
        let root = dict(vec![(
            "Sheets",
            Value::Array(vec![
                Value::Dictionary(dict(vec![("SheetTitle", string("Overview"))])),
                Value::Dictionary(Dictionary::new()),
            ]),
        )]);

        let document = Builder::new(BuildConfig::default()).build(&root).unwrap();
        let titles: Vec<&str> = document.sheets().iter().map(Sheet::title).collect();

        assert_eq!(titles, vec!["Overview", "Canvas 2"]);
    }

    #[test]
    fn test_line_with_points() {
        let line = Value::Dictionary(dict(vec![
            ("Class", string("LineGraphic")),
            (
                "Points",
                Value::Array(vec![string("{0, 0}"), string("{100, 100}")]),
            ),
        ]));

        let Graphic::Line(line) = build_one(line).unwrap() else {
            panic!("expected a line");
        };
        assert_eq!(
            line.path(),
            &LinePath::Points(vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)])
        );
        assert_eq!(line.style().fill_color(), None);
    }

    #[test]
    fn test_line_prefers_logical_path() {
        let elements = Value::Array(vec![
            Value::Dictionary(dict(vec![
                ("element", string("MOVETO")),
                ("point", string("{0, 0}")),
            ])),
            Value::Dictionary(dict(vec![
                ("element", string("CURVETO")),
                ("point", string("{30, 0}")),
                ("control1", string("{10, -10}")),
                ("control2", string("{20, 10}")),
            ])),
            Value::Dictionary(dict(vec![("element", string("CLOSE"))])),
        ]);
        let line = Value::Dictionary(dict(vec![
            ("Class", string("LineGraphic")),
            ("Points", Value::Array(vec![string("{0, 0}")])),
            (
                "LogicalPath",
                Value::Dictionary(dict(vec![("elements", elements)])),
            ),
        ]));

        let Graphic::Line(line) = build_one(line).unwrap() else {
            panic!("expected a line");
        };
        let LinePath::Logical(ops) = line.path() else {
            panic!("expected a logical path");
        };
        assert_eq!(ops.len(), 3);
        assert_eq!(
            ops[1],
            PathOp::CurveTo {
                to: Point::new(30.0, 0.0),
                control1: Point::new(10.0, -10.0),
                control2: Point::new(20.0, 10.0),
            }
        );
    }

    #[test]
    fn test_unknown_path_element_fails() {
        let line = Value::Dictionary(dict(vec![
            ("Class", string("LineGraphic")),
            (
                "LogicalPath",
                Value::Dictionary(dict(vec![(
                    "elements",
                    Value::Array(vec![Value::Dictionary(dict(vec![(
                        "element",
                        string("ARCTO"),
                    )]))]),
                )])),
            ),
        ]));

        assert_eq!(
            build_one(line),
            Err(Error::UnsupportedGraphic("path element `ARCTO`".to_string()))
        );
    }

    #[test]
    fn test_shape_dispatch() {
        let cases = [
            (None, ShapeKind::PlainRectangle),
            (Some("Circle"), ShapeKind::Circle),
            (Some("Diamond"), ShapeKind::Diamond),
            (Some("Octagon"), ShapeKind::Octagon),
            (
                Some("6D5E3A21-0B4C-4F55-9E7A-1C2D3E4F5A6B"),
                ShapeKind::ExportedShape {
                    id: "6D5E3A21-0B4C-4F55-9E7A-1C2D3E4F5A6B".to_string(),
                },
            ),
        ];

        for (shape, expected) in cases {
            let Graphic::Shaped(graphic) = build_one(shaped(shape, "{{0, 0}, {10, 10}}")).unwrap()
            else {
                panic!("expected a shaped graphic");
            };
            assert_eq!(graphic.kind(), &expected);
        }
    }

    #[test]
    fn test_adjustable_arrow_defaults() {
        let Graphic::Shaped(graphic) =
            build_one(shaped(Some("AdjustableArrow"), "{{0, 0}, {100, 40}}")).unwrap()
        else {
            panic!("expected a shaped graphic");
        };

        assert_eq!(
            graphic.kind(),
            &ShapeKind::AdjustableArrow {
                ratio: 0.5,
                shaft_width: 20.0
            }
        );
    }

    #[test]
    fn test_adjustable_double_arrow_shape_data() {
        let graphic = Value::Dictionary(dict(vec![
            ("Class", string("ShapedGraphic")),
            ("Bounds", string("{{0, 0}, {100, 40}}")),
            ("Shape", string("AdjustableDoubleArrow")),
            (
                "ShapeData",
                Value::Dictionary(dict(vec![
                    ("ratio", Value::Real(0.25)),
                    ("width", string("12")),
                ])),
            ),
            ("VFlip", string("YES")),
        ]));

        let Graphic::Shaped(graphic) = build_one(graphic).unwrap() else {
            panic!("expected a shaped graphic");
        };
        assert_eq!(
            graphic.kind(),
            &ShapeKind::AdjustableDoubleArrow {
                ratio: 0.25,
                shaft_width: 12.0
            }
        );
        assert!(graphic.vflip());
    }

    #[test]
    fn test_unknown_shape_fails() {
        assert_eq!(
            build_one(shaped(Some("Cloud"), "{{0, 0}, {10, 10}}")),
            Err(Error::UnsupportedGraphic("shape `Cloud`".to_string()))
        );
    }

    #[test]
    fn test_unknown_class_fails() {
        let graphic = Value::Dictionary(dict(vec![("Class", string("TableGroup"))]));
        assert_eq!(
            build_one(graphic),
            Err(Error::UnsupportedGraphic("graphic class `TableGroup`".to_string()))
        );
    }

    #[test]
    fn test_negative_bounds_fail() {
        assert!(matches!(
            build_one(shaped(None, "{{0, 0}, {-1, 10}}")),
            Err(Error::GeometryParse { .. })
        ));
    }

    #[test]
    fn test_shaped_style_and_text() {
        let graphic = Value::Dictionary(dict(vec![
            ("Class", string("ShapedGraphic")),
            ("Bounds", string("{{0, 0}, {10, 10}}")),
            (
                "Style",
                Value::Dictionary(dict(vec![(
                    "stroke",
                    Value::Dictionary(dict(vec![("HeadArrow", string("Arrow"))])),
                )])),
            ),
            (
                "Text",
                Value::Dictionary(dict(vec![(
                    "Text",
                    string(r"{\rtf1\ansi\ansicpg1252 caf\'e9}"),
                )])),
            ),
        ]));

        let Graphic::Shaped(graphic) = build_one(graphic).unwrap() else {
            panic!("expected a shaped graphic");
        };
        assert_eq!(graphic.style().fill_color(), Some(Rgb8::WHITE));
        assert_eq!(graphic.style().arrows(), (Some(ArrowKind::Arrow), None));

        let text = graphic.text().unwrap();
        assert_eq!(text.encoding(), "windows-1252");
        assert_eq!(rtf::resolve_text(text.raw(), text.encoding()).unwrap(), "café");
    }

    #[test]
    fn test_text_without_codepage_uses_configured_encoding() {
        let graphic = Value::Dictionary(dict(vec![
            ("Class", string("ShapedGraphic")),
            ("Bounds", string("{{0, 0}, {10, 10}}")),
            (
                "Text",
                Value::Dictionary(dict(vec![("Text", string(r"{\rtf1 hi}"))])),
            ),
        ]));
        let root = sheet_with(vec![graphic]);

        let document = Builder::new(BuildConfig::new("shift_jis")).build(&root).unwrap();
        let Graphic::Shaped(graphic) = &document.sheets()[0].graphics()[0] else {
            panic!("expected a shaped graphic");
        };
        assert_eq!(graphic.text().unwrap().encoding(), "shift_jis");
    }

    #[test]
    fn test_groups_nest() {
        let group = Value::Dictionary(dict(vec![
            ("Class", string("Group")),
            (
                "Graphics",
                Value::Array(vec![shaped(None, "{{0, 0}, {1, 1}}"), shaped(Some("Circle"), "{{0, 0}, {1, 1}}")]),
            ),
        ]));

        let Graphic::Group(children) = build_one(group).unwrap() else {
            panic!("expected a group");
        };
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_group_depth_limit() {
        let mut graphic = shaped(None, "{{0, 0}, {1, 1}}");
        for _ in 0..=MAX_GROUP_DEPTH {
            graphic = Value::Dictionary(dict(vec![
                ("Class", string("Group")),
                ("Graphics", Value::Array(vec![graphic])),
            ]));
        }

        assert!(matches!(
            build_one(graphic),
            Err(Error::UnsupportedGraphic(_))
        ));
    }

    #[test]
    fn test_export_shapes() {
        let root = dict(vec![
            (
                "ExportShapes",
                Value::Array(vec![Value::Dictionary(dict(vec![
                    ("ShapeName", string("6D5E3A21-0B4C-4F55-9E7A-1C2D3E4F5A6B")),
                    (
                        "StrokePath",
                        Value::Dictionary(dict(vec![(
                            "elements",
                            Value::Array(vec![
                                Value::Dictionary(dict(vec![
                                    ("element", string("MOVETO")),
                                    ("point", string("{-0.5, -0.5}")),
                                ])),
                                Value::Dictionary(dict(vec![
                                    ("element", string("LINETO")),
                                    ("point", string("{0.5, 0.5}")),
                                ])),
                            ]),
                        )])),
                    ),
                ]))]),
            ),
            ("GraphicsList", Value::Array(Vec::new())),
        ]);

        let document = Builder::new(BuildConfig::default()).build(&root).unwrap();
        let shapes = document.sheets()[0].export_shapes();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].id(), "6D5E3A21-0B4C-4F55-9E7A-1C2D3E4F5A6B");
        assert_eq!(shapes[0].stroke_path().len(), 2);
    }
}
