use crate::checkout::payload::Provider;
use crate::config::MerchantConfig;
use serde::{Deserialize, Serialize};

/// Channel the customer intends to pay through. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementMethod {
    /// Pay at the counter (cash or other)
    Cash,
    /// Promotional online-banking flow; the only method that carries a discount
    OnlinePromotion,
    /// Direct payment through provider A (Alipay)
    ProviderA,
    /// Direct payment through provider B (WeChat Pay)
    ProviderB,
}

impl SettlementMethod {
    pub fn label(&self) -> &'static str {
        match self {
            SettlementMethod::Cash => "cash",
            SettlementMethod::OnlinePromotion => "online-promotion",
            SettlementMethod::ProviderA => "provider-a",
            SettlementMethod::ProviderB => "provider-b",
        }
    }

    /// Direct provider behind this method, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            SettlementMethod::ProviderA => Some(Provider::Alipay),
            SettlementMethod::ProviderB => Some(Provider::WeChat),
            SettlementMethod::Cash | SettlementMethod::OnlinePromotion => None,
        }
    }

    /// Cash and the online promotion are always offered; provider methods only
    /// when their merchant id is configured.
    pub fn is_available(&self, merchant: &MerchantConfig) -> bool {
        match self {
            SettlementMethod::Cash | SettlementMethod::OnlinePromotion => true,
            SettlementMethod::ProviderA => merchant.provider_a().is_some(),
            SettlementMethod::ProviderB => merchant.provider_b().is_some(),
        }
    }
}

/// Promotional bank program; only meaningful under `OnlinePromotion`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubMethod {
    /// Random reduction program
    #[default]
    BankX,
    /// Tiered fixed-discount program
    BankY,
}

impl SubMethod {
    pub fn label(&self) -> &'static str {
        match self {
            SubMethod::BankX => "bank-x",
            SubMethod::BankY => "bank-y",
        }
    }
}

/// Methods offered for this merchant, in display order.
pub fn available_methods(merchant: &MerchantConfig) -> Vec<SettlementMethod> {
    [
        SettlementMethod::Cash,
        SettlementMethod::OnlinePromotion,
        SettlementMethod::ProviderA,
        SettlementMethod::ProviderB,
    ]
    .into_iter()
    .filter(|method| method.is_available(merchant))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_providers_offers_counter_fallback() {
        let methods = available_methods(&MerchantConfig::new());
        assert_eq!(
            methods,
            vec![SettlementMethod::Cash, SettlementMethod::OnlinePromotion]
        );
    }

    #[test]
    fn test_configured_providers_are_offered() {
        let merchant = MerchantConfig::new().with_provider_b("wx-1");
        let methods = available_methods(&merchant);
        assert!(methods.contains(&SettlementMethod::ProviderB));
        assert!(!methods.contains(&SettlementMethod::ProviderA));

        let merchant = merchant.with_provider_a("ali-1");
        assert_eq!(available_methods(&merchant).len(), 4);
    }

    #[test]
    fn test_provider_mapping() {
        assert_eq!(SettlementMethod::ProviderA.provider(), Some(Provider::Alipay));
        assert_eq!(SettlementMethod::ProviderB.provider(), Some(Provider::WeChat));
        assert_eq!(SettlementMethod::Cash.provider(), None);
        assert_eq!(SubMethod::default(), SubMethod::BankX);
    }
}
