use cosmrs::tendermint::abci::Event;

const STORE_CODE_EVENT: &str = "store_code";
const CODE_ID_ATTR: &str = "code_id";
const INSTANTIATE_EVENT: &str = "instantiate";
const CONTRACT_ADDRESS_ATTR: &str = "_contract_address";

fn attribute<'a>(events: &'a [Event], kind: &str, key: &str) -> Option<&'a str> {
    events
        .iter()
        .filter(|event| event.kind == kind)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key_str().is_ok_and(|k| k == key))
        .and_then(|attr| attr.value_str().ok())
}

pub(crate) fn code_id(events: &[Event]) -> Option<u64> {
    attribute(events, STORE_CODE_EVENT, CODE_ID_ATTR)?.parse().ok()
}

pub(crate) fn contract_address(events: &[Event]) -> Option<String> {
    attribute(events, INSTANTIATE_EVENT, CONTRACT_ADDRESS_ATTR).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use cosmrs::tendermint::abci::Event;

    use super::*;

    #[test]
    fn finds_code_id_in_store_code_event() {
        let events = vec![
            Event::new("message", [("action", "/cosmwasm.wasm.v1.MsgStoreCode")]),
            Event::new(
                "store_code",
                [("code_checksum", "deadbeef"), ("code_id", "42")],
            ),
        ];

        assert_eq!(code_id(&events), Some(42));
    }

    #[test]
    fn code_id_ignores_other_event_kinds() {
        let events = vec![Event::new("message", [("code_id", "7")])];

        assert_eq!(code_id(&events), None);
    }

    #[test]
    fn unparsable_code_id_is_missing() {
        let events = vec![Event::new("store_code", [("code_id", "forty-two")])];

        assert_eq!(code_id(&events), None);
    }

    #[test]
    fn finds_instantiated_contract_address() {
        let events = vec![
            Event::new("message", [("module", "wasm")]),
            Event::new(
                "instantiate",
                [("_contract_address", "archway1contract"), ("code_id", "42")],
            ),
        ];

        assert_eq!(
            contract_address(&events).as_deref(),
            Some("archway1contract")
        );
        assert_eq!(contract_address(&[]), None);
    }
}
