//! Promo Handlers

pub(crate) mod apply;
pub(crate) mod banner;
pub(crate) mod create;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use plaza::promos::{Discount, PromoCode};
    use plaza_app::domain::promos::records::{PromoRecord, PromoUuid};

    pub(crate) fn make_promo(code: &str, discount: Discount) -> PromoRecord {
        PromoRecord {
            uuid: PromoUuid::new(),
            code: PromoCode::new(code),
            discount,
            min_cart_value: 0,
            active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
pub(crate) use tests::make_promo;
