use crate::response::Confirmation;

/// Selects the confirmations with the given type name, e.g. [`Confirmation::TRADE_OFFER`].
/// Order is preserved.
pub fn filter_by_type<I>(
    confirmations: I,
    type_name: &str,
) -> Vec<Confirmation>
where
    I: IntoIterator<Item = Confirmation>,
{
    confirmations
        .into_iter()
        .filter(|confirmation| confirmation.is_type(type_name))
        .collect()
}

/// Builds the `cid[]` and `ck[]` form fields for a batch of confirmations. All IDs come
/// before all nonces, each in input order.
pub fn multi_confirmation_fields<'a, I>(
    confirmations: I,
) -> Vec<(&'static str, String)>
where
    I: IntoIterator<Item = &'a Confirmation>,
{
    let (ids, nonces): (Vec<_>, Vec<_>) = confirmations
        .into_iter()
        .map(|confirmation| (
            ("cid[]", confirmation.id.to_string()),
            ("ck[]", confirmation.nonce.to_string()),
        ))
        .unzip();
    
    ids.into_iter().chain(nonces).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn confirmation(id: u64, type_name: &str) -> Confirmation {
        serde_json::from_value(serde_json::json!({
            "type_name": type_name,
            "id": id.to_string(),
            "nonce": (id * 100).to_string(),
        })).unwrap()
    }
    
    #[test]
    fn filters_by_type_in_order() {
        let confirmations = vec![
            confirmation(1, Confirmation::TRADE_OFFER),
            confirmation(2, Confirmation::MARKET_LISTING),
            confirmation(3, Confirmation::TRADE_OFFER),
            confirmation(4, "Account Recovery"),
        ];
        let trade_offers = filter_by_type(confirmations.clone(), Confirmation::TRADE_OFFER);
        
        assert_eq!(trade_offers.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
        
        let listings = filter_by_type(confirmations.clone(), Confirmation::MARKET_LISTING);
        
        assert_eq!(listings, vec![confirmations[1].clone()]);
    }
    
    #[test]
    fn filter_matches_exact_type_name() {
        let confirmations = vec![confirmation(1, "Trade Offer ")];
        
        assert!(filter_by_type(confirmations, Confirmation::TRADE_OFFER).is_empty());
        assert!(filter_by_type(Vec::new(), Confirmation::TRADE_OFFER).is_empty());
    }
    
    #[test]
    fn groups_ids_before_nonces() {
        let confirmations = [
            confirmation(1, Confirmation::TRADE_OFFER),
            confirmation(2, Confirmation::TRADE_OFFER),
        ];
        let fields = multi_confirmation_fields(&confirmations);
        
        assert_eq!(fields, vec![
            ("cid[]", "1".to_string()),
            ("cid[]", "2".to_string()),
            ("ck[]", "100".to_string()),
            ("ck[]", "200".to_string()),
        ]);
    }
}
