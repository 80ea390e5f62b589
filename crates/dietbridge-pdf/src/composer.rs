//! Diet plan composer
//!
//! Walks a [`DietPlanRecord`] and lays it out onto pages: title, metadata and
//! description first, then every day, meal, ingredient, instruction line and
//! nutrition table in input order. Each block is checked against the page's
//! break limit before it is placed, so nothing is cut off at the bottom.
//! Footers are stamped once the final page count is known.

use dietbridge_model::{DayPlan, DietPlanRecord, Meal, NutritionalInfo};
use tracing::debug;

use crate::document::{Align, Block, BlockKind, ComposedDocument, Page, TextBlock};
use crate::layout::{Geometry, LayoutOptions};
use crate::metrics::{wrap_text, FontStyle};
use crate::pages::{Cursor, PageBuilder};
use crate::table::{PlainTableRenderer, TableRenderer, TableSpec};

/// Printed instead of the day-by-day plan when there is none
pub const EMPTY_PLAN_NOTICE: &str = "No detailed meal plan available.";

const BULLET: char = '\u{2022}';

/// Indentation of ingredients, instructions and tables
const INDENT: f32 = 5.0;
const DESCRIPTION_WIDTH: f32 = 170.0;
const INSTRUCTION_WIDTH: f32 = 160.0;

const TITLE_GAP: f32 = 5.0;
const METADATA_GAP: f32 = 5.0;
const DESCRIPTION_GAP: f32 = 4.0;
const DAY_GAP: f32 = 10.0;
const MEAL_GAP: f32 = 5.0;

const TABLE_WIDTH: f32 = 80.0;
const TABLE_FONT_SIZE: f32 = 9.0;
const TABLE_ROW_HEIGHT: f32 = 6.0;

/// Type size, face and vertical advance of one kind of line
#[derive(Debug, Clone, Copy)]
struct LineStyle {
    size: f32,
    face: FontStyle,
    advance: f32,
}

impl LineStyle {
    const fn new(size: f32, face: FontStyle, advance: f32) -> Self {
        Self {
            size,
            face,
            advance,
        }
    }
}

const TITLE: LineStyle = LineStyle::new(20.0, FontStyle::Bold, 10.0);
const METADATA: LineStyle = LineStyle::new(12.0, FontStyle::Regular, 7.0);
const DESCRIPTION: LineStyle = LineStyle::new(11.0, FontStyle::Regular, 6.0);
const NOTICE: LineStyle = LineStyle::new(10.0, FontStyle::Regular, 6.0);
const DAY_HEADER: LineStyle = LineStyle::new(14.0, FontStyle::Bold, 8.0);
const MEAL_HEADING: LineStyle = LineStyle::new(12.0, FontStyle::Bold, 7.0);
const INGREDIENTS_LABEL: LineStyle = LineStyle::new(10.0, FontStyle::Regular, 6.0);
const INGREDIENT: LineStyle = LineStyle::new(10.0, FontStyle::Regular, 5.0);
const INSTRUCTION: LineStyle = LineStyle::new(10.0, FontStyle::Regular, 5.0);
const FOOTER: LineStyle = LineStyle::new(8.0, FontStyle::Regular, 3.0);

/// A single line waiting to be placed
struct Line {
    kind: BlockKind,
    text: String,
    x: f32,
    align: Align,
    style: LineStyle,
}

impl Line {
    fn left(kind: BlockKind, text: String, x: f32, style: LineStyle) -> Self {
        Self {
            kind,
            text,
            x,
            align: Align::Left,
            style,
        }
    }
}

/// Horizontal band a wrapped paragraph is set in
#[derive(Debug, Clone, Copy)]
struct Column {
    x: f32,
    width: f32,
    align: Align,
}

/// Lays out diet plans onto pages
#[derive(Debug, Clone)]
pub struct Composer<T = PlainTableRenderer> {
    options: LayoutOptions,
    geometry: Geometry,
    table: T,
}

impl Composer {
    pub fn new(options: LayoutOptions) -> Self {
        Self::with_table_renderer(options, PlainTableRenderer)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl<T: TableRenderer> Composer<T> {
    /// Use a custom renderer for nutrition tables
    pub fn with_table_renderer(options: LayoutOptions, table: T) -> Self {
        let geometry = Geometry::for_page(options.page_size);
        Self {
            options,
            geometry,
            table,
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Lay out one diet plan
    ///
    /// Pure and deterministic: the record is only read, and equal records
    /// produce equal documents.
    pub fn compose(&self, record: &DietPlanRecord) -> ComposedDocument {
        let g = self.geometry;
        let mut pages = PageBuilder::new(g.page_width, g.page_height, g.top_margin);

        let cursor = pages.top();
        let cursor = self.emit_title(&mut pages, cursor, &record.title);
        let cursor = self.emit_metadata(&mut pages, cursor, record);
        let cursor = self.emit_wrapped(
            &mut pages,
            cursor,
            BlockKind::Description,
            &record.description,
            self.body_column(DESCRIPTION_WIDTH),
            DESCRIPTION,
        );
        let cursor = cursor.advance(DESCRIPTION_GAP);

        let cursor = if record.has_meal_plan() {
            record
                .days()
                .iter()
                .fold(cursor, |cursor, day| self.emit_day(&mut pages, cursor, day))
        } else {
            let notice = Line::left(
                BlockKind::EmptyPlanNotice,
                EMPTY_PLAN_NOTICE.to_string(),
                g.left_margin,
                NOTICE,
            );
            self.emit(&mut pages, cursor, notice)
        };

        debug!(
            title = %record.title,
            pages = pages.page_count(),
            end_y = cursor.y(),
            "composed diet plan"
        );

        let mut finished = pages.finalize();
        self.stamp_footers(&mut finished);

        ComposedDocument {
            title: record.title.clone(),
            file_name: record.export_file_name("pdf"),
            pages: finished,
        }
    }

    fn emit_title(&self, pages: &mut PageBuilder, cursor: Cursor, title: &str) -> Cursor {
        let column = Column {
            x: self.geometry.center_x(),
            width: self.content_width(),
            align: Align::Center,
        };
        self.emit_wrapped(pages, cursor, BlockKind::Title, title, column, TITLE)
            .advance(TITLE_GAP)
    }

    fn emit_metadata(
        &self,
        pages: &mut PageBuilder,
        cursor: Cursor,
        record: &DietPlanRecord,
    ) -> Cursor {
        let mut rows = vec![
            format!("Type: {}", record.plan_type.label()),
            format!(
                "Created: {}",
                self.options.date_style.format(record.created_date)
            ),
            format!("Source: {}", record.source.label()),
        ];
        if let Some(name) = record
            .dietitian_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            rows.push(format!("Dietitian: {}", name));
        }

        let column = self.body_column(self.content_width());
        rows.iter()
            .fold(cursor, |cursor, row| {
                self.emit_wrapped(pages, cursor, BlockKind::Metadata, row, column, METADATA)
            })
            .advance(METADATA_GAP)
    }

    fn emit_day(&self, pages: &mut PageBuilder, cursor: Cursor, day: &DayPlan) -> Cursor {
        let header = Line::left(
            BlockKind::DayHeader,
            day.day.clone(),
            self.geometry.left_margin,
            DAY_HEADER,
        );
        let cursor = self.emit(pages, cursor.advance(DAY_GAP), header);

        day.meals
            .iter()
            .fold(cursor, |cursor, meal| self.emit_meal(pages, cursor, meal))
    }

    fn emit_meal(&self, pages: &mut PageBuilder, cursor: Cursor, meal: &Meal) -> Cursor {
        let left = self.geometry.left_margin;
        let indent = left + INDENT;

        let heading = format!("{}: {}", meal.meal_type, meal.name);
        let cursor = self.emit_wrapped(
            pages,
            cursor,
            BlockKind::MealHeading,
            &heading,
            self.body_column(self.content_width()),
            MEAL_HEADING,
        );

        let label = Line::left(
            BlockKind::IngredientsLabel,
            "Ingredients:".to_string(),
            left,
            INGREDIENTS_LABEL,
        );
        let cursor = self.emit(pages, cursor, label);

        let cursor = meal.ingredients.iter().fold(cursor, |cursor, ingredient| {
            let line = Line::left(
                BlockKind::Ingredient,
                format!("{} {}", BULLET, ingredient),
                indent,
                INGREDIENT,
            );
            self.emit(pages, cursor, line)
        });

        let cursor = match meal
            .instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        {
            Some(text) => self.emit_wrapped(
                pages,
                cursor,
                BlockKind::Instruction,
                &format!("Instructions: {}", text),
                Column {
                    x: indent,
                    width: INSTRUCTION_WIDTH,
                    align: Align::Left,
                },
                INSTRUCTION,
            ),
            None => cursor,
        };

        match &meal.nutritional_info {
            Some(info) => self.emit_nutrition(pages, cursor, info),
            None => cursor.advance(MEAL_GAP),
        }
    }

    fn emit_nutrition(
        &self,
        pages: &mut PageBuilder,
        cursor: Cursor,
        info: &NutritionalInfo,
    ) -> Cursor {
        let mut spec = TableSpec {
            kind: BlockKind::NutritionTable,
            x: self.geometry.left_margin + INDENT,
            y: cursor.y(),
            width: TABLE_WIDTH,
            rows: nutrition_rows(info),
            font_size: TABLE_FONT_SIZE,
            row_height: TABLE_ROW_HEIGHT,
        };
        let cursor = self.ensure_space(pages, cursor, spec.height());
        spec.y = cursor.y();

        let bottom = self.table.draw(pages.current_page_mut(), &spec);

        cursor.below(bottom).advance(MEAL_GAP)
    }

    /// Place a paragraph line by line, each line checked for space
    fn emit_wrapped(
        &self,
        pages: &mut PageBuilder,
        cursor: Cursor,
        kind: BlockKind,
        text: &str,
        column: Column,
        style: LineStyle,
    ) -> Cursor {
        wrap_text(text, style.face, style.size, column.width)
            .into_iter()
            .fold(cursor, |cursor, text| {
                let line = Line {
                    kind,
                    text,
                    x: column.x,
                    align: column.align,
                    style,
                };
                self.emit(pages, cursor, line)
            })
    }

    /// Place one line below the cursor, breaking the page first if needed
    fn emit(&self, pages: &mut PageBuilder, cursor: Cursor, line: Line) -> Cursor {
        let cursor = self.ensure_space(pages, cursor, line.style.advance);
        debug_assert_eq!(cursor.page() + 1, pages.page_count());

        pages.current_page_mut().push(Block::Text(TextBlock {
            kind: line.kind,
            text: line.text,
            x: line.x,
            y: cursor.y(),
            height: line.style.advance,
            font_size: line.style.size,
            style: line.style.face,
            align: line.align,
        }));

        cursor.advance(line.style.advance)
    }

    /// Start a new page when a block of `height` would end below the limit
    ///
    /// A block that ends exactly on the limit still fits. A page whose cursor
    /// is still at the top margin is never abandoned.
    fn ensure_space(&self, pages: &mut PageBuilder, cursor: Cursor, height: f32) -> Cursor {
        let overflows = cursor.y() + height > self.geometry.break_limit;
        let page_in_use = cursor.y() > self.geometry.top_margin;
        if overflows && page_in_use {
            pages.start_new_page()
        } else {
            cursor
        }
    }

    fn stamp_footers(&self, pages: &mut [Page]) {
        let total = pages.len();
        for page in pages.iter_mut() {
            let text = footer_text(&self.options.brand, page.number, total);
            let x = page.width / 2.0;
            page.push(Block::Text(TextBlock {
                kind: BlockKind::Footer,
                text,
                x,
                y: self.geometry.footer_y,
                height: FOOTER.advance,
                font_size: FOOTER.size,
                style: FOOTER.face,
                align: Align::Center,
            }));
        }
    }

    fn content_width(&self) -> f32 {
        self.geometry.page_width - 2.0 * self.geometry.left_margin
    }

    fn body_column(&self, width: f32) -> Column {
        Column {
            x: self.geometry.left_margin,
            width,
            align: Align::Left,
        }
    }
}

/// Rows of the nutrition table
pub fn nutrition_rows(info: &NutritionalInfo) -> Vec<String> {
    vec![
        format!("Calories: {} kcal", info.calories),
        format!("Protein: {}g", info.protein),
        format!("Carbs: {}g", info.carbs),
        format!("Fats: {}g", info.fats),
    ]
}

/// Footer text for page `page` of `total`
pub fn footer_text(brand: &str, page: usize, total: usize) -> String {
    format!("Generated by {} - Page {} of {}", brand, page, total)
}
