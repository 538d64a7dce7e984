use std::marker::PhantomData;

use super::intent::FetchIntent;
use super::state::{FetchSlot, FetchState};
use crate::mvi::Reducer;

pub struct FetchReducer<T>(PhantomData<fn() -> T>);

impl<T> Reducer for FetchReducer<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    type State = FetchSlot<T>;
    type Intent = FetchIntent<T>;

    fn reduce(slot: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Clear { ticket } => FetchSlot {
                ticket,
                state: FetchState::Idle,
            },
            FetchIntent::Begin { ticket, key } => FetchSlot {
                ticket,
                state: FetchState::Pending { key },
            },
            FetchIntent::Settle { ticket, outcome } => {
                if ticket != slot.ticket {
                    // Superseded request
                    return slot;
                }
                match slot.state {
                    FetchState::Pending { key } => FetchSlot {
                        ticket,
                        state: match outcome {
                            Ok(data) => FetchState::Success { key, data },
                            Err(error) => FetchState::Error { key, error },
                        },
                    },
                    // Already settled under this ticket
                    state => FetchSlot { ticket, state },
                }
            }
        }
    }
}
