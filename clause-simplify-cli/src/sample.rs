/// Contract used when no input file is given.
pub const SAMPLE_CONTRACT: &str = "
    Clause 1.1 The Parties agree that this Agreement shall be governed by the laws of the State of California.
    Clause 2.3 The Party shall indemnify and hold harmless the other Party from any liabilities, losses, and damages arising from this Agreement.
    Clause 4.2 In the event of termination, either party must give 30 days' written notice.
    Clause 5.1 This Agreement shall remain confidential and not be disclosed to third parties without prior written consent.
    Clause 6.1 The payment terms shall be net 30 days from the date of invoice.
    Clause 7.5 Any disputes arising shall be subject to jurisdiction in San Francisco, California.
";
