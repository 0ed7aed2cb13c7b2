use crate::model::{Alliance, Confidence, MatchPrediction};

const EPA_SCALING_FACTOR: f64 = 30.0;
const HIGH_CONFIDENCE_PCT: f64 = 75.0;
const MEDIUM_CONFIDENCE_PCT: f64 = 60.0;

pub fn predict_match(red_epas: &[f64], blue_epas: &[f64]) -> MatchPrediction {
    let red_epa = red_epas.iter().sum::<f64>();
    let blue_epa = blue_epas.iter().sum::<f64>();

    let epa_difference = red_epa - blue_epa;
    let red_win_probability = 1.0 / (1.0 + (-epa_difference / EPA_SCALING_FACTOR).exp());
    let blue_win_probability = 1.0 - red_win_probability;

    let red_win_pct = red_win_probability * 100.0;
    let blue_win_pct = blue_win_probability * 100.0;

    let max_pct = red_win_pct.max(blue_win_pct);
    let confidence = if max_pct >= HIGH_CONFIDENCE_PCT {
        Confidence::High
    } else if max_pct >= MEDIUM_CONFIDENCE_PCT {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    MatchPrediction {
        red_epa: round_tenth(red_epa),
        blue_epa: round_tenth(blue_epa),
        red_win_prob: round_tenth(red_win_pct),
        blue_win_prob: round_tenth(blue_win_pct),
        predicted_winner: if red_win_probability > 0.5 {
            Alliance::Red
        } else {
            Alliance::Blue
        },
        confidence,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_alliances_split_the_odds() {
        let prediction = predict_match(&[20.0, 10.0, 15.0], &[25.0, 10.0, 10.0]);
        assert_eq!(prediction.red_epa, 45.0);
        assert_eq!(prediction.blue_epa, 45.0);
        assert_eq!(prediction.red_win_prob, 50.0);
        assert_eq!(prediction.blue_win_prob, 50.0);
        assert_eq!(prediction.predicted_winner, Alliance::Blue);
        assert_eq!(prediction.confidence, Confidence::Low);
    }

    #[test]
    fn strong_epa_edge_is_high_confidence() {
        let prediction = predict_match(&[40.0, 30.0, 25.0], &[10.0, 5.0, 5.0]);
        assert_eq!(prediction.predicted_winner, Alliance::Red);
        assert_eq!(prediction.confidence, Confidence::High);
        assert!(prediction.red_win_prob > 90.0);
    }

    #[test]
    fn probabilities_sum_to_one_hundred() {
        let prediction = predict_match(&[22.5, 18.0], &[30.0]);
        assert!((prediction.red_win_prob + prediction.blue_win_prob - 100.0).abs() <= 0.1);
    }

    #[test]
    fn moderate_edge_is_medium_confidence() {
        // 10 EPA difference -> about 58/42, 15 -> about 62/38
        let prediction = predict_match(&[50.0], &[35.0]);
        assert_eq!(prediction.confidence, Confidence::Medium);
    }
}
