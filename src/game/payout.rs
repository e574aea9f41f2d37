use super::evaluator::HandRank;

pub const MIN_BET: u32 = 1;
pub const MAX_BET: u32 = 5;

/// 9/6 Jacks-or-Better pay schedule, expressed as a per-rank multiplier.
/// The royal flush jumps to 800x at max bet; everything else scales
/// linearly with the bet.
pub fn multiplier(rank: HandRank, bet: u32) -> u32 {
    match rank {
        HandRank::Nothing => 0,
        HandRank::JacksOrBetter => 1,
        HandRank::TwoPair => 2,
        HandRank::ThreeOfAKind => 3,
        HandRank::Straight => 4,
        HandRank::Flush => 6,
        HandRank::FullHouse => 9,
        HandRank::FourOfAKind => 25,
        HandRank::StraightFlush => 50,
        HandRank::RoyalFlush => {
            if bet == MAX_BET {
                800
            } else {
                250
            }
        }
    }
}

/// Base multiplier independent of bet size, used by the strategy engine's
/// expected-value accumulation.
pub fn base_multiplier(rank: HandRank) -> u32 {
    multiplier(rank, MIN_BET)
}

pub fn payout(rank: HandRank, bet: u32) -> u32 {
    multiplier(rank, bet) * bet
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(HandRank::Nothing, 0)]
    #[case(HandRank::JacksOrBetter, 1)]
    #[case(HandRank::TwoPair, 2)]
    #[case(HandRank::ThreeOfAKind, 3)]
    #[case(HandRank::Straight, 4)]
    #[case(HandRank::Flush, 6)]
    #[case(HandRank::FullHouse, 9)]
    #[case(HandRank::FourOfAKind, 25)]
    #[case(HandRank::StraightFlush, 50)]
    fn test_multipliers_are_bet_independent(#[case] rank: HandRank, #[case] expected: u32) {
        for bet in MIN_BET..=MAX_BET {
            assert_eq!(multiplier(rank, bet), expected);
        }
    }

    #[test]
    fn test_royal_flush_max_bet_bonus() {
        assert_eq!(multiplier(HandRank::RoyalFlush, 1), 250);
        assert_eq!(multiplier(HandRank::RoyalFlush, 4), 250);
        assert_eq!(multiplier(HandRank::RoyalFlush, 5), 800);
    }

    #[test]
    fn test_payout_scales_with_bet() {
        assert_eq!(payout(HandRank::FullHouse, 3), 27);
        assert_eq!(payout(HandRank::RoyalFlush, 5), 4000);
        assert_eq!(payout(HandRank::RoyalFlush, 1), 250);
    }

    #[test]
    fn test_nothing_pays_zero_at_every_bet() {
        for bet in MIN_BET..=MAX_BET {
            assert_eq!(payout(HandRank::Nothing, bet), 0);
        }
    }
}
