use super::{GAME_RETURN_BPS, Kobo, Member, apply_rate, mul_div_rem};

/// Accrue one week of interest on a single member and return the interest
/// actually credited. Compounding folds interest into principal; otherwise it
/// lands in accumulated interest. The week counter advances either way.
pub fn accrue_member(member: &mut Member, compound: bool) -> Kobo {
    let interest = member.weekly_interest();
    let credited = if compound {
        let before = member.principal;
        member.principal = before.saturating_add(interest);
        member.principal - before
    } else {
        let before = member.accumulated_interest;
        member.accumulated_interest = before.saturating_add(interest);
        member.accumulated_interest - before
    };
    member.weeks += 1;
    credited
}

fn saturating_sum(amounts: impl Iterator<Item = Kobo>) -> Kobo {
    amounts.fold(0, Kobo::saturating_add)
}

/// Sum of principal over the given members.
pub fn total_principal(members: &[Member]) -> Kobo {
    saturating_sum(members.iter().map(|m| m.principal))
}

/// Sum of accumulated interest over the given members.
pub fn total_accumulated_interest(members: &[Member]) -> Kobo {
    saturating_sum(members.iter().map(|m| m.accumulated_interest))
}

/// The group game pays a fixed return on aggregate principal.
pub fn game_return(total_principal: Kobo) -> Kobo {
    apply_rate(total_principal, GAME_RETURN_BPS)
}

/// Split `pool` across `weights` proportionally, conserving every kobo.
///
/// Each share starts at the floor of `pool * weight / total`. Kobo left over
/// from truncation go one at a time to the largest fractional remainders;
/// ties go to the earlier entry. The result always sums to `pool`.
///
/// Returns all zeros when the weights sum to zero or the pool is not positive.
pub fn split_proportionally(pool: Kobo, weights: &[Kobo]) -> Vec<Kobo> {
    let total = saturating_sum(weights.iter().map(|&w| w.max(0)));
    if total <= 0 || pool <= 0 {
        return vec![0; weights.len()];
    }

    let mut shares: Vec<Kobo> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(weights.len());

    for (idx, &weight) in weights.iter().enumerate() {
        let (share, remainder) =
            mul_div_rem(pool as u128, weight.max(0) as u128, total as u128);
        // share <= pool because weight <= total
        shares.push(share as Kobo);
        remainders.push((idx, remainder));
    }

    let distributed = saturating_sum(shares.iter().copied());
    let leftover = (pool - distributed).max(0) as usize;

    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for &(idx, _) in remainders.iter().take(leftover) {
        shares[idx] += 1;
    }

    shares
}
