use crate::evaluation::ConfusionMatrix;
use crate::labels::OrdinalLabel;
use crate::methods::criteria::Criterion;
use crate::report::{AnalysisReport, ProductReport};
use crate::scorer::{MethodComparison, RankedProduct};
use crate::summary::LabelDistribution;

const RULE: &str = "======================================================================";

/// Plain-text formatter for console output
pub struct TextFormatter;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

impl TextFormatter {
    pub fn format_analysis(report: &AnalysisReport) -> String {
        let mut out = String::with_capacity(4096);

        Self::section(&mut out, "DATASET");
        let d = &report.dataset;
        out.push_str(&format!("Products:          {}\n", d.products));
        out.push_str(&format!("Brands:            {}\n", d.brands));
        out.push_str(&format!("Categories:        {}\n", d.categories));
        out.push_str(&format!("Organic:           {:.1}%\n", d.organic_pct));
        out.push_str(&format!("Mean additives:    {}\n", fmt_opt(d.mean_additives, 2)));
        out.push_str("Nutri-Score labels:\n");
        Self::format_distribution(&mut out, &d.reference_labels);

        Self::section(&mut out, "REFERENCE PROFILES");
        out.push_str(&format!("{:<16}", "criterion"));
        for profile in report.profiles.iter() {
            out.push_str(&format!("{:>9}", profile.name()));
        }
        out.push_str(&format!("{:>9}\n", "weight"));
        for criterion in Criterion::ALL {
            out.push_str(&format!("{:<16}", criterion.key()));
            for profile in report.profiles.iter() {
                out.push_str(&format!("{:>9.2}", profile.value(criterion)));
            }
            out.push_str(&format!("{:>9.3}\n", report.criteria_weights.get(criterion)));
        }
        out.push_str(&format!("λ = {}\n", report.lambda));

        Self::section(&mut out, "NUTRI-SCORE RECOMPUTATION");
        Self::format_comparison(&mut out, &report.nutriscore_agreement);

        let run = &report.working_lambda;
        Self::section(&mut out, &format!("CLASSIFICATION AT λ = {}", run.lambda));
        for procedure_run in &run.procedures {
            out.push_str(&format!(
                "ELECTRE TRI {} - accuracy {:.1}%\n",
                procedure_run.procedure,
                procedure_run.accuracy * 100.0
            ));
            Self::format_distribution(&mut out, &procedure_run.labels);
        }
        out.push_str("SuperNutri-Score\n");
        Self::format_distribution(&mut out, &run.supernutri);

        Self::section(&mut out, "METHOD COMPARISON");
        let w = &report.supernutri_weights;
        out.push_str(&format!(
            "SuperNutri weights: nutrition {:.2}, environmental {:.2}, organic {:.2}\n\n",
            w.nutrition, w.environmental, w.organic
        ));
        for comparison in &report.comparisons {
            Self::format_comparison(&mut out, comparison);
        }
        if let Some(best) = report.best_method() {
            out.push_str(&format!(
                "Best agreement: {} ({:.1}%)\n",
                Self::method_title(best),
                best.metrics.accuracy * 100.0
            ));
        }

        Self::section(&mut out, "SUPERNUTRI RANKING");
        out.push_str("Best products:\n");
        Self::format_ranking(&mut out, &report.ranking.best);
        out.push_str("Worst products:\n");
        Self::format_ranking(&mut out, &report.ranking.worst);

        Self::section(&mut out, "CATEGORIES");
        for category in &report.categories {
            out.push_str(&format!(
                "{} ({} products) - mean sugars {} g, mean additives {}\n",
                category.category,
                category.products,
                fmt_opt(category.mean_sugars, 1),
                fmt_opt(category.mean_additives, 1)
            ));
            Self::format_distribution(&mut out, &category.reference_labels);
        }

        out
    }

    pub fn format_product(report: &ProductReport) -> String {
        let mut out = String::with_capacity(1024);
        let p = &report.product;

        Self::section(&mut out, &p.name);
        out.push_str(&format!("Brand:     {}\n", p.brand));
        out.push_str(&format!("Category:  {}\n", p.category));
        out.push_str(&format!(
            "Reference: Nutri-Score {}, Green-Score {}, organic {}\n",
            p.reference_label.as_deref().unwrap_or("-"),
            p.environmental_label.as_deref().unwrap_or("-"),
            p.organic_label
        ));

        out.push_str("\nComposition (per 100 ml):\n");
        out.push_str(&format!("  Energy:        {:.0} kJ\n", p.energy_kj));
        out.push_str(&format!("  Saturated fat: {:.2} g\n", p.saturated_fat_g));
        out.push_str(&format!("  Sugars:        {:.2} g\n", p.sugars_g));
        out.push_str(&format!("  Salt:          {:.2} g\n", p.salt_g));
        out.push_str(&format!("  Proteins:      {:.2} g\n", p.protein_g));
        out.push_str(&format!("  Fiber:         {:.2} g\n", p.fiber_g));
        out.push_str(&format!("  Fruit/veg:     {:.0} %\n", p.fruit_veg_pct));
        out.push_str(&format!("  Additives:     {:.0}\n", p.additive_count));

        let n = &report.nutriscore;
        out.push_str(&format!("\nNutri-Score: {} ({})\n", n.label, n.score));
        if !n.is_water {
            let pts = &n.points;
            out.push_str(&format!(
                "  N = energy {} + sat. fat {} + sugars {} + salt {} + sweeteners {} = {}\n",
                pts.energy, pts.saturated_fat, pts.sugars, pts.salt, pts.sweeteners, n.negative
            ));
            out.push_str(&format!(
                "  P = proteins {} + fiber {} + fruit/veg {} (capped) = {}\n",
                pts.protein, pts.fiber, pts.fruit_veg, n.positive
            ));
        }
        out.push_str(&format!("  {}\n", n.explanation));

        for assignment in &report.electre {
            let decided_by = assignment
                .deciding_profile
                .map_or_else(|| "no profile".to_string(), |idx| format!("b{}", idx));
            out.push_str(&format!(
                "ELECTRE TRI {}: {} (decided by {})\n",
                assignment.procedure, assignment.label, decided_by
            ));
        }

        let s = &report.supernutri;
        out.push_str(&format!("SuperNutri-Score: {} ({:.3})\n", s.label, s.score));
        out.push_str(&format!(
            "  nutrition {:.3}, environmental {:.3}, organic {:.3}\n",
            s.details.nutrition_norm, s.details.environmental_norm, s.details.organic_norm
        ));

        out
    }

    fn section(out: &mut String, title: &str) {
        out.push_str(&format!("\n{}\n{}\n{}\n", RULE, title, RULE));
    }

    fn method_title(comparison: &MethodComparison) -> String {
        match comparison.lambda {
            Some(lambda) => format!("{} (λ={})", comparison.method, lambda),
            None => comparison.method.clone(),
        }
    }

    fn format_distribution(out: &mut String, distribution: &LabelDistribution) {
        let parts: Vec<String> = OrdinalLabel::ALL
            .iter()
            .map(|&l| format!("{}: {}", l, distribution.get(l)))
            .collect();
        out.push_str(&format!("  {}", parts.join("  ")));
        if distribution.unlabeled > 0 {
            out.push_str(&format!("  (unlabeled: {})", distribution.unlabeled));
        }
        out.push('\n');
    }

    fn format_comparison(out: &mut String, comparison: &MethodComparison) {
        let m = &comparison.metrics;
        out.push_str(&format!(
            "{}: accuracy {:.1}%, macro F1 {:.3} ({} pairs",
            Self::method_title(comparison),
            m.accuracy * 100.0,
            m.macro_f1,
            m.total
        ));
        if m.dropped > 0 {
            out.push_str(&format!(", {} dropped", m.dropped));
        }
        out.push_str(")\n");
        Self::format_matrix(out, &comparison.matrix);
        out.push('\n');
    }

    /// Rows: reference label, columns: predicted label
    fn format_matrix(out: &mut String, matrix: &ConfusionMatrix) {
        out.push_str("       ");
        for label in OrdinalLabel::ALL {
            out.push_str(&format!("{:>6}", label));
        }
        out.push('\n');
        for truth in OrdinalLabel::ALL {
            out.push_str(&format!("  {:<5}", truth));
            for predicted in OrdinalLabel::ALL {
                out.push_str(&format!("{:>6}", matrix.get(truth, predicted)));
            }
            out.push('\n');
        }
    }

    fn format_ranking(out: &mut String, ranking: &[RankedProduct]) {
        for (rank, product) in ranking.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} ({}) - {:.3} [{}]\n",
                rank + 1,
                product.name,
                product.brand,
                product.score,
                product.label
            ));
        }
    }
}
