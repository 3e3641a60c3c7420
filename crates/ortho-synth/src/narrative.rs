//! Japanese narrative text for derived evidence rows.
//!
//! Treatment-effect sentences come from a static table of
//! `(category, direction) -> template` rows. Risk-profile and scenario text
//! is assembled from threshold-gated clauses.

use ortho_core::enums::{EffectCategory, EffectDirection};

type Template = fn(&str, f64) -> String;

/// One row of the treatment-effect template table.
pub struct EffectTemplate {
    pub category: EffectCategory,
    pub direction: EffectDirection,
    render: Template,
}

macro_rules! template {
    ($category:ident, $direction:ident, $render:expr) => {
        EffectTemplate {
            category: EffectCategory::$category,
            direction: EffectDirection::$direction,
            render: $render,
        }
    };
}

/// Decrease/increase sentence for every category. Magnitudes arrive rounded
/// to an integer; multiplier templates print one decimal.
pub static EFFECT_TEMPLATES: [EffectTemplate; 16] = [
    template!(CariesRisk, Decrease, |name, v| format!(
        "{name}を矯正することで、齲蝕リスクが{v}%減少します。"
    )),
    template!(CariesRisk, Increase, |name, v| format!(
        "{name}を放置すると、齲蝕リスクが{v}%増加します。"
    )),
    template!(PeriodontalRisk, Decrease, |name, v| format!(
        "{name}を矯正することで、歯周病リスクが{v}%減少します。"
    )),
    template!(PeriodontalRisk, Increase, |name, v| format!(
        "{name}を放置すると、歯周病リスクが{v}%増加します。"
    )),
    template!(TmjRisk, Decrease, |name, v| format!(
        "{name}を矯正することで、顎関節症リスクが{v}%減少します。"
    )),
    template!(TmjRisk, Increase, |name, v| format!(
        "{name}を放置すると、顎関節症リスクが{:.1}倍になります。",
        v / 20.0
    )),
    template!(Mastication, Decrease, |name, v| format!(
        "{name}を矯正することで、咀嚼効率が{v}%向上します。"
    )),
    template!(Mastication, Increase, |name, v| format!(
        "{name}を放置すると、咀嚼効率が{v}%低下します。"
    )),
    template!(Aesthetic, Decrease, |name, _| format!(
        "{name}を矯正することで、審美性が大幅に向上します。"
    )),
    template!(Aesthetic, Increase, |name, _| format!(
        "{name}を放置すると、審美性に問題が生じます。"
    )),
    template!(Pronunciation, Decrease, |name, v| format!(
        "{name}を矯正することで、発音障害が{v}%改善します。"
    )),
    template!(Pronunciation, Increase, |name, v| format!(
        "{name}を放置すると、発音障害リスクが{:.1}倍になります。",
        v / 25.0
    )),
    template!(TraumaRisk, Decrease, |name, v| format!(
        "{name}を矯正することで、外傷リスクが{v}%減少します。"
    )),
    template!(TraumaRisk, Increase, |name, v| format!(
        "{name}を放置すると、外傷リスクが{:.1}倍になります。",
        v / 20.0
    )),
    template!(Other, Decrease, |name, v| format!(
        "{name}を矯正することで、口腔健康リスクが{v}%減少します。"
    )),
    template!(Other, Increase, |name, v| format!(
        "{name}を放置すると、口腔健康リスクが{v}%増加します。"
    )),
];

/// Sentence describing a treatment effect for `condition_name`.
///
/// The magnitude is rounded half-to-even before it reaches the template.
/// Directions without a template get a generic statement.
#[must_use]
pub fn describe_effect(
    condition_name: &str,
    category: EffectCategory,
    magnitude: f64,
    direction: EffectDirection,
) -> String {
    let rounded = magnitude.round_ties_even();
    EFFECT_TEMPLATES
        .iter()
        .find(|row| row.category == category && row.direction == direction)
        .map_or_else(
            || format!("{condition_name}の矯正により効果が期待できます。"),
            |row| (row.render)(condition_name, rounded),
        )
}

// ---------------------------------------------------------------------------
// Risk profiles
// ---------------------------------------------------------------------------

/// Narrative for an evidence-backed risk profile.
#[must_use]
pub fn describe_risk(threshold: u32, risk: f64) -> String {
    let mut text =
        format!("{threshold}歳までに矯正を行わないと、将来的に{risk:.1}%の歯を喪失するリスクがあります。");
    if threshold >= 18 {
        text.push_str(&format!(
            " また、歯周病リスクが{:.1}%上昇します。",
            (risk * 1.2).min(95.0)
        ));
    }
    if threshold >= 25 {
        text.push_str(&format!(
            " 顎関節症リスクが{:.1}倍になります。",
            (risk * 0.06).min(3.0)
        ));
    }
    if threshold >= 40 {
        text.push_str(&format!(
            " 咀嚼機能が{:.1}%低下します。",
            (risk * 0.8).min(50.0)
        ));
    }
    if threshold >= 60 {
        text.push_str(&format!(
            " 発音障害リスクが{:.1}倍になります。",
            (risk * 0.04).min(3.0)
        ));
    }
    text
}

/// Narrative for a risk profile produced without literature backing.
#[must_use]
pub fn describe_default_risk(threshold: u32, risk: f64) -> String {
    let mut text =
        format!("{threshold}歳までに矯正を行わないと、将来的に{risk:.1}%の歯を喪失するリスクがあります。");
    if threshold >= 18 {
        text.push_str(" また、歯周病リスクが上昇します。");
    }
    text
}

// ---------------------------------------------------------------------------
// Future scenarios
// ---------------------------------------------------------------------------

/// Age band of a scenario, chosen by the bucket's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioBand {
    Young,
    Middle,
    Senior,
}

impl ScenarioBand {
    #[must_use]
    pub const fn for_age_min(age_min: u32) -> Self {
        if age_min <= 18 {
            Self::Young
        } else if age_min <= 40 {
            Self::Middle
        } else {
            Self::Senior
        }
    }
}

fn join_clauses(clauses: &[String]) -> String {
    format!("{}.", clauses.join(". "))
}

/// Outcome narrative when treatment is carried out.
#[must_use]
pub fn with_treatment(years: u32, band: ScenarioBand) -> String {
    let horizon_bonus = (years / 2).min(10);
    let mut clauses = vec![
        "歯並びが改善され、清掃性が向上".to_string(),
        format!("齲蝕・歯周病リスクが{}%減少", 40 - horizon_bonus),
        "審美性向上により社会的自信が増加".to_string(),
    ];
    let chewing_gain = if band == ScenarioBand::Young {
        25 + horizon_bonus
    } else {
        25
    };
    clauses.push(format!("咀嚼効率が{chewing_gain}%向上し、消化不良の問題が改善"));

    if years >= 10 {
        clauses.push(
            match band {
                ScenarioBand::Young => "歯の喪失リスクが65%減少",
                ScenarioBand::Middle => "歯の喪失リスクが50%減少",
                ScenarioBand::Senior => "歯の喪失リスクが35%減少",
            }
            .to_string(),
        );
        clauses.extend(
            [
                "顎関節症の発症を予防",
                "咀嚼効率の維持により栄養状態が良好",
                "歯並びの安定により新たな歯科問題の発生を抑制",
            ]
            .map(String::from),
        );
    }

    if years >= 20 {
        clauses.push(
            match band {
                ScenarioBand::Young => "健康な歯列の維持により高齢になっても80%以上の歯を保持",
                ScenarioBand::Middle => "健康な歯列の維持により高齢になっても70%以上の歯を保持",
                ScenarioBand::Senior => "健康な歯列の維持により残存歯の喪失を最小限に抑制",
            }
            .to_string(),
        );
        clauses.extend(
            [
                "入れ歯やインプラントの必要性が大幅に減少",
                "良好な咀嚼機能により食事の質と栄養状態を維持",
                "会話の明瞭さを保ち、社会的交流の質を維持",
            ]
            .map(String::from),
        );
    }

    join_clauses(&clauses)
}

/// Outcome narrative when the malocclusion is left untreated.
#[must_use]
pub fn without_treatment(years: u32, band: ScenarioBand) -> String {
    let (risk_increase, chewing_loss) = match years {
        0..=5 => (35, 15),
        6..=10 => (45, 25),
        _ => (60, 40),
    };
    let mut clauses = vec![
        "歯列不正が継続し、清掃困難な部位での齲蝕・歯周病リスクが上昇".to_string(),
        format!("齲蝕・歯周病リスクが{risk_increase}%上昇"),
        format!("咀嚼効率が約{chewing_loss}%低下"),
        match band {
            ScenarioBand::Young => "若年期の問題が成長と共に悪化",
            ScenarioBand::Middle => "成人期の問題が蓄積",
            ScenarioBand::Senior => "既存の問題が加齢と共に悪化",
        }
        .to_string(),
        "消化不良や栄養吸収の問題が発生する可能性".to_string(),
    ];

    if years >= 10 {
        let teeth = match band {
            ScenarioBand::Young => "1〜3本",
            ScenarioBand::Middle => "2〜5本",
            ScenarioBand::Senior => "3〜7本",
        };
        clauses.push(format!("歯周病の進行により、{teeth}の歯を喪失するリスクが高まる"));
        clauses.extend(
            [
                "顎関節症を発症するリスクが2.5倍に",
                "咀嚼効率がさらに低下し、食事の選択肢が制限される可能性",
            ]
            .map(String::from),
        );
    }

    if years >= 20 {
        let teeth = match band {
            ScenarioBand::Young => "5〜8本",
            ScenarioBand::Middle => "8〜12本",
            ScenarioBand::Senior => "10〜15本",
        };
        clauses.push(format!("重度の歯周病により、{teeth}以上の歯を喪失する可能性が高い"));
        clauses.extend(
            [
                "多数の歯の欠損により入れ歯やインプラント治療が必要になる可能性が70%以上",
                "咀嚼機能が50%以上低下し、栄養不足のリスクが増加",
                "発音障害により社会的コミュニケーションに支障をきたす可能性",
            ]
            .map(String::from),
        );
    }

    join_clauses(&clauses)
}
