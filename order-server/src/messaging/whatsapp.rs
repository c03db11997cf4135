//! WhatsApp order message and deep link

use std::fmt::Write;

use shared::models::{DeliveryType, Order, PAYMENT_CASH, PAYMENT_PIX};
use shared::util::digits_only;

use crate::orders::money::format_brl;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Brazilian phone mask: `(AA) NNNN-NNNN` up to 10 digits, `(AA) NNNNN-NNNN` above.
///
/// Partial input is formatted as far as it goes; too few digits are returned as-is.
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    let middle = if digits.len() <= 10 { 4 } else { 5 };
    if digits.len() < 2 + middle {
        return digits;
    }

    let (area, rest) = digits.split_at(2);
    let (first, rest) = rest.split_at(middle);
    let (last, tail) = rest.split_at(rest.len().min(4));

    if last.is_empty() {
        format!("({area}) {first}")
    } else {
        format!("({area}) {first}-{last}{tail}")
    }
}

/// Render the order summary sent to the store.
pub fn build_whatsapp_message(order: &Order, store_name: &str) -> String {
    let mut msg = String::new();
    let customer = &order.customer;

    // write! into a String cannot fail
    let _ = writeln!(
        msg,
        "*NOVO PEDIDO # {} - {}*\n",
        order.order_number,
        store_name.to_uppercase()
    );

    let _ = writeln!(
        msg,
        "*DADOS DO CLIENTE:*\nNome: {}\nTelefone: {}\n",
        customer.name,
        format_phone(&customer.phone)
    );

    match order.delivery_type {
        DeliveryType::Delivery => {
            let address = &customer.address;
            let _ = writeln!(
                msg,
                "*ENDEREÇO PARA ENTREGA:*\n{}, {}",
                address.street, address.number
            );
            if let Some(complement) = address.complement.as_deref().filter(|c| !c.is_empty()) {
                let _ = writeln!(msg, "Complemento: {complement}");
            }
            let _ = writeln!(msg, "Bairro: {}\nCEP: {}", address.neighborhood, address.cep);
            if let Some(reference) = address.reference.as_deref().filter(|r| !r.is_empty()) {
                let _ = writeln!(msg, "Referência: {reference}");
            }
        }
        DeliveryType::Pickup => {
            let _ = writeln!(msg, "*TIPO:* Retirada no local");
        }
    }

    let _ = writeln!(msg, "\n*PRODUTOS:*");
    for item in order.items.iter().filter(|i| i.quantity > 0) {
        let _ = writeln!(
            msg,
            "{}x {} - {} cada",
            item.quantity,
            item.product.name,
            format_brl(item.product.price_for(order.delivery_type))
        );
    }

    let _ = writeln!(msg, "\n*TOTAL: {}*\n", format_brl(order.total_amount));
    let _ = writeln!(
        msg,
        "*FORMA DE PAGAMENTO:* {}",
        order.payment_method.to_uppercase()
    );

    if order.payment_method == PAYMENT_CASH && order.needs_change {
        let _ = writeln!(msg, "Precisa de troco para: R$ {}", order.change_amount);
    }
    if order.payment_method == PAYMENT_PIX {
        let _ = writeln!(msg, "⚠️ *LEMBRETE:* Enviar comprovante do PIX");
    }

    msg
}

/// `https://wa.me/<number>?text=<percent-encoded message>`
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}/{}?text={}",
        digits_only(number),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        Address, Customer, OrderItem, OrderSource, OrderStatus, PAYMENT_CARD, ProductSnapshot,
    };

    fn order(delivery_type: DeliveryType, payment_method: &str, needs_change: bool) -> Order {
        Order {
            id: 1,
            order_number: 482913,
            customer: Customer {
                name: "Maria Souza".into(),
                phone: "32991440248".into(),
                address: Address {
                    street: "Rua das Flores".into(),
                    number: "120".into(),
                    neighborhood: "Centro".into(),
                    city: "Juiz de Fora".into(),
                    cep: "36010000".into(),
                    complement: None,
                    reference: Some("Portão azul".into()),
                },
            },
            items: vec![OrderItem {
                product: ProductSnapshot {
                    id: 7,
                    name: "Botijão P13".into(),
                    weight: "13".into(),
                    pickup_price: 95.0,
                    delivery_price: 105.0,
                },
                quantity: 2,
            }],
            delivery_type,
            payment_method: payment_method.into(),
            needs_change,
            change_amount: "250".into(),
            notes: String::new(),
            status: OrderStatus::Pending,
            total_amount: 210.0,
            created_at: 0,
            delivery_date: None,
            source: OrderSource::Storefront,
        }
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("32991440248"), "(32) 99144-0248");
        assert_eq!(format_phone("3232151234"), "(32) 3215-1234");
        assert_eq!(format_phone("(32) 3215-12"), "(32) 3215-12");
        assert_eq!(format_phone("323215"), "(32) 3215");
        assert_eq!(format_phone("3232"), "3232");
        assert_eq!(format_phone("329914402481"), "(32) 99144-02481");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_delivery_message_with_change() {
        let msg = build_whatsapp_message(&order(DeliveryType::Delivery, "dinheiro", true), "Norte Gás");
        assert!(msg.starts_with("*NOVO PEDIDO # 482913 - NORTE GÁS*\n\n"));
        assert!(msg.contains("Nome: Maria Souza\nTelefone: (32) 99144-0248\n"));
        assert!(msg.contains("*ENDEREÇO PARA ENTREGA:*\nRua das Flores, 120\n"));
        assert!(msg.contains("Bairro: Centro\nCEP: 36010000\nReferência: Portão azul\n"));
        assert!(msg.contains("2x Botijão P13 - R$ 105.00 cada\n"));
        assert!(msg.contains("*TOTAL: R$ 210.00*"));
        assert!(msg.contains("*FORMA DE PAGAMENTO:* DINHEIRO\n"));
        assert!(msg.contains("Precisa de troco para: R$ 250\n"));
        assert!(!msg.contains("PIX"));
    }

    #[test]
    fn test_pickup_message_with_pix_reminder() {
        let msg = build_whatsapp_message(&order(DeliveryType::Pickup, "pix", false), "Norte Gás");
        assert!(msg.contains("*TIPO:* Retirada no local\n"));
        assert!(!msg.contains("ENDEREÇO"));
        assert!(msg.contains("2x Botijão P13 - R$ 95.00 cada\n"));
        assert!(msg.contains("*FORMA DE PAGAMENTO:* PIX\n"));
        assert!(msg.contains("⚠️ *LEMBRETE:* Enviar comprovante do PIX"));
    }

    #[test]
    fn test_card_payment_has_no_change_line() {
        let msg = build_whatsapp_message(&order(DeliveryType::Delivery, PAYMENT_CARD, true), "x");
        assert!(!msg.contains("troco"));
        assert!(msg.contains("CARTAO"));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link("+55 (32) 99144-0248", "*PEDIDO* # 1\nOlá");
        assert_eq!(
            link,
            "https://wa.me/5532991440248?text=%2APEDIDO%2A%20%23%201%0AOl%C3%A1"
        );
    }
}
