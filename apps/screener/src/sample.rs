//! Sample resume: writes a one-page PDF for trying the screener without real data.

use std::path::Path;

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const INCH: f64 = 72.0;
const PAGE_WIDTH: f64 = 8.5 * INCH;
const PAGE_HEIGHT: f64 = 11.0 * INCH;
const LEFT: f64 = INCH;

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

fn pt(v: f64) -> Object {
    Object::Integer(v.round() as i64)
}

/// Accumulates drawing operations top-down, tracking the current baseline.
struct PageWriter {
    ops: Vec<Operation>,
    y: f64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            y: PAGE_HEIGHT - INCH,
        }
    }

    fn text_at(&mut self, font: Font, size: i64, x: f64, y: f64, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource().into(), Object::Integer(size)]),
            Operation::new("Td", vec![pt(x), pt(y)]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn line(&mut self, font: Font, size: i64, text: &str) {
        self.text_at(font, size, LEFT, self.y, text);
    }

    fn skip(&mut self, inches: f64) {
        self.y -= inches * INCH;
    }

    /// Section title with a rule underneath.
    fn heading(&mut self, title: &str) {
        self.line(Font::Bold, 14, title);
        let y = self.y - 5.0;
        self.ops.extend([
            Operation::new("m", vec![pt(LEFT), pt(y)]),
            Operation::new("l", vec![pt(PAGE_WIDTH - INCH), pt(y)]),
            Operation::new("S", vec![]),
        ]);
        self.skip(0.3);
    }

    fn bullets(&mut self, items: &[&str]) {
        for item in items {
            self.line(Font::Regular, 10, &format!("- {item}"));
            self.skip(0.2);
        }
    }

    /// Bold title on the left, regular dates at `dates_x` inches, same baseline.
    fn role(&mut self, title: &str, dates: &str, dates_x: f64) {
        self.line(Font::Bold, 11, title);
        self.text_at(Font::Regular, 10, dates_x * INCH, self.y, dates);
    }
}

fn sample_page() -> PageWriter {
    let mut page = PageWriter::new();

    page.line(Font::Bold, 24, "John Smith");
    page.skip(0.3);
    page.line(
        Font::Regular,
        10,
        "john.smith@email.com | (555) 123-4567 | San Francisco, CA",
    );
    page.skip(0.2);
    page.line(
        Font::Regular,
        10,
        "LinkedIn: linkedin.com/in/johnsmith | GitHub: github.com/johnsmith",
    );
    page.skip(0.5);

    page.heading("PROFESSIONAL SUMMARY");
    for line in [
        "Aspiring Data Scientist with 2 years of experience in data analysis and machine learning.",
        "Proficient in Python, SQL, and statistical modeling. Passionate about turning data into actionable insights.",
    ] {
        page.line(Font::Regular, 10, line);
        page.skip(0.2);
    }
    page.skip(0.3);

    page.heading("TECHNICAL SKILLS");
    page.bullets(&[
        "Programming: Python (Pandas, NumPy, Scikit-Learn, Matplotlib), R, SQL",
        "Machine Learning: Linear Regression, Random Forests, K-Means Clustering, Neural Networks",
        "Tools: Jupyter Notebook, Git, Docker, Tableau, Power BI",
        "Cloud: AWS (S3, EC2), Google Cloud Platform",
        "Databases: PostgreSQL, MySQL, MongoDB",
    ]);
    page.skip(0.3);

    page.heading("WORK EXPERIENCE");
    page.role("Junior Data Analyst | TechCorp Inc.", "Jan 2023 - Present", 5.0);
    page.skip(0.25);
    page.bullets(&[
        "Built predictive models using Python and Scikit-Learn to forecast customer churn",
        "Created automated data pipelines using SQL and Python, reducing report time by 40%",
        "Developed interactive dashboards in Tableau for executive stakeholders",
        "Collaborated with cross-functional teams to define KPIs and metrics",
    ]);
    page.skip(0.2);
    page.role("Data Science Intern | StartupXYZ", "Jun 2022 - Dec 2022", 5.0);
    page.skip(0.25);
    page.bullets(&[
        "Performed exploratory data analysis on 1M+ customer records",
        "Implemented NLP models for sentiment analysis of customer reviews",
        "Presented findings to leadership, influencing product roadmap decisions",
    ]);
    page.skip(0.3);

    page.heading("EDUCATION");
    page.role(
        "B.S. in Computer Science | University of California, Berkeley",
        "2018 - 2022",
        5.5,
    );
    page.skip(0.2);
    page.line(
        Font::Regular,
        10,
        "Relevant Coursework: Machine Learning, Statistical Analysis, Data Structures, Algorithms",
    );
    page.skip(0.4);

    page.heading("CERTIFICATIONS");
    page.bullets(&[
        "AWS Certified Cloud Practitioner (2024)",
        "Google Data Analytics Professional Certificate (2023)",
    ]);

    page
}

/// Writes the John Smith sample resume (US letter, Helvetica) to `path`.
pub fn write_sample_resume(path: &Path) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let content = Content {
        operations: sample_page().ops,
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content
            .encode()
            .context("Failed to encode sample resume content")?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![pt(0.0), pt(0.0), pt(PAGE_WIDTH), pt(PAGE_HEIGHT)],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
