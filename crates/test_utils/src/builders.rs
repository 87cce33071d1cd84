//! Test data builders
//!
//! Builders with sensible defaults so tests only spell out the fields
//! they care about.

use chrono::Utc;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;

use core_kernel::MerchantId;
use domain_merchant::Merchant;
use domain_order::{NewOrder, Order};
use domain_payment::CardInput;

use crate::fixtures::CardFixtures;

/// Builder for test orders
pub struct TestOrderBuilder {
    merchant_id: MerchantId,
    amount: i64,
    currency: Option<String>,
    receipt: Option<String>,
    notes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for TestOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrderBuilder {
    pub fn new() -> Self {
        Self {
            merchant_id: MerchantId::new(),
            amount: 500,
            currency: None,
            receipt: None,
            notes: None,
        }
    }

    pub fn with_merchant(mut self, merchant_id: MerchantId) -> Self {
        self.merchant_id = merchant_id;
        self
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    /// Builds the order, panicking on invalid input; tests that exercise
    /// rejection paths should call `domain_order::Order::create` directly.
    pub fn build(self) -> Order {
        Order::create(
            self.merchant_id,
            NewOrder {
                amount: self.amount,
                currency: self.currency,
                receipt: self.receipt,
                notes: self.notes,
            },
        )
        .expect("test order input should be valid")
    }
}

/// Builder for card inputs
pub struct TestCardBuilder {
    number: String,
    expiry_month: u32,
    expiry_year: i32,
    cvv: String,
    holder_name: Option<String>,
}

impl Default for TestCardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCardBuilder {
    pub fn new() -> Self {
        Self {
            number: CardFixtures::visa().to_string(),
            expiry_month: 12,
            expiry_year: 2099,
            cvv: "123".to_string(),
            holder_name: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_expiry(mut self, month: u32, year: i32) -> Self {
        self.expiry_month = month;
        self.expiry_year = year;
        self
    }

    pub fn expired(self) -> Self {
        self.with_expiry(1, 2001)
    }

    pub fn build(self) -> CardInput {
        CardInput {
            number: self.number,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            cvv: self.cvv,
            holder_name: self.holder_name,
        }
    }
}

/// Builds a merchant record with fake identity data
pub struct TestMerchantBuilder {
    name: String,
    email: String,
    api_key: String,
    api_secret: String,
    is_active: bool,
}

impl Default for TestMerchantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMerchantBuilder {
    pub fn new() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            name: CompanyName().fake(),
            email: SafeEmail().fake(),
            api_key: format!("key_test_{}", &suffix[..12]),
            api_secret: format!("secret_test_{}", &suffix[12..24]),
            is_active: true,
        }
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = api_key.into();
        self.api_secret = api_secret.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Merchant {
        let now = Utc::now();
        Merchant {
            id: MerchantId::new(),
            name: self.name,
            email: self.email,
            api_key: self.api_key,
            api_secret: self.api_secret,
            webhook_url: None,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
