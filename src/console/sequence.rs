use super::query::TeamQuery;

/// A list request in flight, tagged with its issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: TeamQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &TeamQuery {
        &self.query
    }
}

/// Hands out monotonically increasing tickets. Only the most recently
/// issued ticket may update visible state.
#[derive(Debug, Default)]
pub struct FetchSequence {
    issued: u64,
}

impl FetchSequence {
    pub fn issue(&mut self, query: TeamQuery) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            query,
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued
    }
}
